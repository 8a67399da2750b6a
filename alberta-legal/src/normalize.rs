//! Normalisation du texte libre
//!
//! Minuscules, ponctuation remplacée par des espaces, espaces compactés.
//! Les noms du registre passent par la même fonction, ce qui rend la
//! comparaison insensible à la casse et à la ponctuation ("St. Albert"
//! et "st albert" sont équivalents).

use std::sync::OnceLock;

use regex::Regex;

use crate::types::Coordinates;

/// Boîte englobante approximative de l'Alberta (lat, lon)
const ALBERTA_LAT: (f64, f64) = (49.0, 60.0);
const ALBERTA_LON: (f64, f64) = (-120.0, -110.0);

/// Normalise un texte pour la comparaison
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.extend(c.to_lowercase());
        } else {
            pending_space = true;
        }
    }

    out
}

/// Texte normalisé, avec recherche de phrase alignée sur les tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    normalized: String,
    padded: String,
}

impl NormalizedText {
    pub fn new(raw: &str) -> Self {
        let normalized = normalize(raw);
        let padded = format!(" {} ", normalized);
        Self { normalized, padded }
    }

    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Égalité stricte avec une phrase déjà normalisée
    pub fn equals(&self, phrase: &str) -> bool {
        !phrase.is_empty() && self.normalized == phrase
    }

    /// La phrase (déjà normalisée) apparaît sur des frontières de tokens
    pub fn contains_phrase(&self, phrase: &str) -> bool {
        if phrase.is_empty() {
            return false;
        }
        self.padded.contains(&format!(" {} ", phrase))
    }
}

fn coordinate_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:^|[^\d.])(-?\d{2}\.\d{2,})\s*[,;/\s]\s*(-?\d{2,3}\.\d{2,})")
            .expect("coordinate regex is valid")
    })
}

/// Extrait la première paire décimale "lat, lon" située en Alberta
pub fn extract_coordinates(text: &str) -> Option<Coordinates> {
    coordinate_pattern().captures_iter(text).find_map(|caps| {
        let latitude: f64 = caps.get(1)?.as_str().parse().ok()?;
        let longitude: f64 = caps.get(2)?.as_str().parse().ok()?;
        let in_alberta = (ALBERTA_LAT.0..=ALBERTA_LAT.1).contains(&latitude)
            && (ALBERTA_LON.0..=ALBERTA_LON.1).contains(&longitude);
        in_alberta.then(|| Coordinates::new(latitude, longitude))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_punctuation() {
        assert_eq!(normalize("  St. Albert,  AB "), "st albert ab");
        assert_eq!(normalize("Lac Ste. Anne County"), "lac ste anne county");
        assert_eq!(normalize("NE 12-45-26-W4M"), "ne 12 45 26 w4m");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("--"), "");
    }

    #[test]
    fn test_contains_phrase_respects_token_boundaries() {
        let text = NormalizedText::new("Property near Lacombe, AB");
        assert!(text.contains_phrase("lacombe"));
        assert!(text.contains_phrase("property near"));
        assert!(!text.contains_phrase("lacombe county"));
        assert!(!text.contains_phrase("comb"));
        assert!(!text.contains_phrase(""));
    }

    #[test]
    fn test_equals() {
        let text = NormalizedText::new("  RED deer ");
        assert!(text.equals("red deer"));
        assert!(!text.equals("red"));
        assert!(!NormalizedText::new("").equals(""));
    }

    #[test]
    fn test_extract_coordinates_in_alberta() {
        let coords = extract_coordinates("site at 52.4675, -113.7364 near town").unwrap();
        assert!((coords.latitude - 52.4675).abs() < 1e-9);
        assert!((coords.longitude + 113.7364).abs() < 1e-9);
    }

    #[test]
    fn test_extract_coordinates_outside_alberta_ignored() {
        assert!(extract_coordinates("45.50, -73.56").is_none());
        assert!(extract_coordinates("14.55 acre rural commercial property").is_none());
    }

    #[test]
    fn test_extract_coordinates_needs_whole_latitude() {
        assert!(extract_coordinates("152.47, -113.73").is_none());
        assert!(extract_coordinates("1.52.47, -113.73").is_none());
        let coords = extract_coordinates("(52.47, -113.73)").unwrap();
        assert!((coords.latitude - 52.47).abs() < 1e-9);
    }
}
