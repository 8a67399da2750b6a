//! Analyse des adresses civiques et rurales

use std::sync::OnceLock;

use regex::Regex;

use crate::types::{AddressKind, ParsedAddress, RuralAddress, StreetAddress};

fn street_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)\b(\d+[A-Z]?)\s+([A-Z0-9][A-Z0-9 ]*?\s(?:Street|St|Avenue|Ave|Road|Rd|Drive|Dr|Lane|Ln|Boulevard|Blvd|Way|Circle|Cir|Court|Ct|Crescent|Cres|Close|Trail)\b)",
        )
        .expect("street address regex is valid")
    })
}

fn rural_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)\b(RR|Rural Route|Range Road|Range Rd|Township Road|Twp Rd|Highway|Hwy)\s*(\d+[A-Z]?)\b",
        )
        .expect("rural address regex is valid")
    })
}

fn postal_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\b([A-Z]\d[A-Z])\s?(\d[A-Z]\d)\b").expect("postal code regex is valid")
    })
}

/// Analyse une adresse civique ou rurale
///
/// Une route rurale l'emporte sur une adresse civique pour le type.
pub fn parse(address: &str) -> ParsedAddress {
    let street = street_pattern().captures(address).and_then(|caps| {
        Some(StreetAddress {
            number: caps.get(1)?.as_str().to_uppercase(),
            street: caps.get(2)?.as_str().trim().to_string(),
        })
    });

    let rural = rural_pattern().captures(address).and_then(|caps| {
        Some(RuralAddress {
            road_type: caps.get(1)?.as_str().to_string(),
            road_number: caps.get(2)?.as_str().to_uppercase(),
        })
    });

    let postal_code = postal_pattern().captures(address).and_then(|caps| {
        Some(format!(
            "{}{}",
            caps.get(1)?.as_str(),
            caps.get(2)?.as_str()
        ).to_uppercase())
    });

    let kind = if rural.is_some() {
        AddressKind::Rural
    } else if street.is_some() {
        AddressKind::Street
    } else {
        AddressKind::Unknown
    };

    ParsedAddress {
        kind,
        street,
        rural,
        postal_code,
        full_address: address.trim().to_string(),
    }
}
