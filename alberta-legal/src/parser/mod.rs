//! Parsers du texte libre
//!
//! - `ats`, `lot_block`: descriptions légales
//! - `address`: adresses civiques et rurales
//! - `details`: superficie et mots-clés

pub mod address;
pub mod ats;
pub mod details;
pub mod lot_block;

use crate::types::LegalDescriptionFields;

/// Un matcher reconnaît une forme de description légale dans un texte
pub type Matcher = fn(&str) -> Option<LegalDescriptionFields>;

/// Matchers dans l'ordre de priorité (le premier qui reconnaît l'emporte)
pub const MATCHERS: &[(&str, Matcher)] = &[
    ("ats_short", ats::match_short_form),
    ("ats_long", ats::match_long_form),
    ("ats_title", ats::match_title_form),
    ("lot_block_plan", lot_block::match_lot_block_plan),
    ("plan_block_lot", lot_block::match_plan_block_lot),
    ("parcel_plan", lot_block::match_parcel_plan),
];

/// Applique les matchers dans l'ordre et retourne la première correspondance
pub fn match_legal_description(text: &str) -> Option<LegalDescriptionFields> {
    if text.trim().is_empty() {
        return None;
    }

    MATCHERS.iter().find_map(|(name, matcher)| {
        let fields = matcher(text)?;
        tracing::trace!(matcher = name, matched = %fields.matched_text, "legal description matched");
        Some(fields)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LegalDescription, Quarter};

    #[test]
    fn test_first_matcher_wins() {
        // Les deux formes sont présentes: l'ATS courte passe avant le plan
        let fields =
            match_legal_description("Lot 3 Block 1 Plan 0720345 within NE 12-45-26-W4M").unwrap();
        assert!(matches!(fields.description, LegalDescription::QuarterSection(_)));
    }

    #[test]
    fn test_each_family_recognised() {
        let short = match_legal_description("SW 20-38-27-W4M").unwrap();
        assert_eq!(short.description.township().unwrap().quarter, Some(Quarter::Sw));

        let long = match_legal_description("NE 1/4 Section 12, Township 45, Range 26, W4M").unwrap();
        assert_eq!(long.description.kind_name(), "quarter_section");

        let plan = match_legal_description("Lot 14, Block 2, Plan 0720345").unwrap();
        assert_eq!(plan.description.kind_name(), "lot_block_plan");

        let parcel = match_legal_description("Parcel A, Plan 7520345").unwrap();
        assert_eq!(parcel.description.kind_name(), "parcel_plan");
    }

    #[test]
    fn test_no_match() {
        assert!(match_legal_description("").is_none());
        assert!(match_legal_description("14.55 acre rural commercial property").is_none());
        assert!(match_legal_description("Lot 3, Block 2, planning approval pending").is_none());
    }
}
