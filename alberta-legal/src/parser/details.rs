//! Extraction des caractéristiques depuis les informations complémentaires

use std::sync::OnceLock;

use regex::Regex;

use crate::types::PropertyDetails;

pub const ZONING_KEYWORDS: &[&str] = &[
    "commercial",
    "residential",
    "rural",
    "agricultural",
    "industrial",
];

pub const DEVELOPMENT_KEYWORDS: &[&str] = &[
    "develop",
    "cottages",
    "subdivision",
    "building",
    "construction",
];

pub const INFRASTRUCTURE_KEYWORDS: &[&str] = &["septic", "water", "power", "sewer", "gas", "internet"];

fn acreage_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*acres?\b").expect("acreage regex is valid")
    })
}

/// Extrait superficie et mots-clés (recherche par sous-chaîne, insensible à la casse)
pub fn parse(additional_info: &str) -> PropertyDetails {
    let lower = additional_info.to_lowercase();

    let acreage = acreage_pattern()
        .captures(additional_info)
        .and_then(|caps| caps.get(1)?.as_str().parse::<f64>().ok());

    PropertyDetails {
        acreage,
        zoning_hints: keywords_in(&lower, ZONING_KEYWORDS),
        development_intentions: keywords_in(&lower, DEVELOPMENT_KEYWORDS),
        infrastructure_mentions: keywords_in(&lower, INFRASTRUCTURE_KEYWORDS),
    }
}

fn keywords_in(lower: &str, keywords: &[&str]) -> Vec<String> {
    keywords
        .iter()
        .filter(|k| lower.contains(*k))
        .map(|k| k.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_cottage_property() {
        let details = parse(
            "14.55 acre rural commercial property. Plan to develop the north section with \
             small cottages for rent. The septic pipes and power line are in place. \
             There's no village water, so everyone drills for it.",
        );
        assert_eq!(details.acreage, Some(14.55));
        assert_eq!(details.zoning_hints, vec!["commercial", "rural"]);
        assert_eq!(details.development_intentions, vec!["develop", "cottages"]);
        assert_eq!(details.infrastructure_mentions, vec!["septic", "water", "power"]);
    }

    #[test]
    fn test_integer_acreage() {
        assert_eq!(parse("About 3 Acres of pasture").acreage, Some(3.0));
    }

    #[test]
    fn test_empty_details() {
        let details = parse("nothing useful here");
        assert!(details.is_empty());
    }
}
