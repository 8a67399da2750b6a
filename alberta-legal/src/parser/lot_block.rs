//! Matchers des plans enregistrés: Lot/Block/Plan et Parcel/Plan

use std::sync::OnceLock;

use regex::Regex;

use crate::types::{LegalDescription, LegalDescriptionFields, LotBlockPlan, ParcelPlan};

// Un numéro de plan contient au moins un chiffre: "plan to subdivide" n'est pas un plan
fn lot_block_plan() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)\bLOT\s*([0-9]+[A-Z]?)\s*,?\s*(?:BLOCK|BLK\.?)\s*([0-9]+[A-Z]?)\s*,?\s*PLAN\b\s*([0-9A-Z]*[0-9][0-9A-Z]*(?-i:\s?[A-Z]{2}\b)?)",
        )
        .expect("lot/block/plan regex is valid")
    })
}

fn plan_block_lot() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)\bPLAN\b\s*([0-9A-Z]*[0-9][0-9A-Z]*)\s*,?\s*(?:BLOCK|BLK\.?)\s*([0-9]+[A-Z]?)\s*,?\s*LOT\s*([0-9]+[A-Z]?)\b",
        )
        .expect("plan/block/lot regex is valid")
    })
}

fn parcel_plan() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\bPARCEL\b\s*([0-9A-Z]+)\s*,?\s*PLAN\b\s*([0-9A-Z]*[0-9][0-9A-Z]*)\b")
            .expect("parcel/plan regex is valid")
    })
}

/// `LOT 14, BLOCK 2, PLAN 0720345`
pub fn match_lot_block_plan(text: &str) -> Option<LegalDescriptionFields> {
    let caps = lot_block_plan().captures(text)?;
    Some(fields(
        LegalDescription::LotBlockPlan(LotBlockPlan {
            lot: upper(caps.get(1)?.as_str()),
            block: upper(caps.get(2)?.as_str()),
            plan: upper(caps.get(3)?.as_str()),
        }),
        caps.get(0)?.as_str(),
    ))
}

/// Ordre des titres fonciers: `PLAN 0720345 BLOCK 2 LOT 14`
pub fn match_plan_block_lot(text: &str) -> Option<LegalDescriptionFields> {
    let caps = plan_block_lot().captures(text)?;
    Some(fields(
        LegalDescription::LotBlockPlan(LotBlockPlan {
            lot: upper(caps.get(3)?.as_str()),
            block: upper(caps.get(2)?.as_str()),
            plan: upper(caps.get(1)?.as_str()),
        }),
        caps.get(0)?.as_str(),
    ))
}

/// `PARCEL A, PLAN 7520345`
pub fn match_parcel_plan(text: &str) -> Option<LegalDescriptionFields> {
    let caps = parcel_plan().captures(text)?;
    Some(fields(
        LegalDescription::ParcelPlan(ParcelPlan {
            parcel: upper(caps.get(1)?.as_str()),
            plan: upper(caps.get(2)?.as_str()),
        }),
        caps.get(0)?.as_str(),
    ))
}

fn fields(description: LegalDescription, matched: &str) -> LegalDescriptionFields {
    LegalDescriptionFields {
        description,
        matched_text: matched.trim().to_string(),
        warnings: Vec::new(),
    }
}

fn upper(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lot_block(fields: LegalDescriptionFields) -> LotBlockPlan {
        match fields.description {
            LegalDescription::LotBlockPlan(l) => l,
            other => panic!("Expected LotBlockPlan, got {:?}", other),
        }
    }

    #[test]
    fn test_lot_block_plan() {
        let l = lot_block(match_lot_block_plan("Lot 14, Block 2, Plan 0720345").unwrap());
        assert_eq!(l.lot, "14");
        assert_eq!(l.block, "2");
        assert_eq!(l.plan, "0720345");
    }

    #[test]
    fn test_lot_block_plan_compact_and_letters() {
        let l = lot_block(match_lot_block_plan("lot 7a blk 3 plan 9822ks").unwrap());
        assert_eq!(l.lot, "7A");
        assert_eq!(l.block, "3");
        assert_eq!(l.plan, "9822KS");
    }

    #[test]
    fn test_lot_block_plan_with_plan_suffix() {
        let l = lot_block(match_lot_block_plan("LOT 1 BLOCK 1 PLAN 5281 KS, Lacombe").unwrap());
        assert_eq!(l.plan, "5281 KS");
    }

    #[test]
    fn test_plan_block_lot_title_order() {
        let l = lot_block(match_plan_block_lot("PLAN 0720345 BLOCK 2 LOT 14").unwrap());
        assert_eq!(l.lot, "14");
        assert_eq!(l.block, "2");
        assert_eq!(l.plan, "0720345");
    }

    #[test]
    fn test_parcel_plan() {
        let fields = match_parcel_plan("Parcel A, Plan 7520345").unwrap();
        assert_eq!(fields.matched_text, "Parcel A, Plan 7520345");
        match fields.description {
            LegalDescription::ParcelPlan(p) => {
                assert_eq!(p.parcel, "A");
                assert_eq!(p.plan, "7520345");
            }
            other => panic!("Expected ParcelPlan, got {:?}", other),
        }
    }

    #[test]
    fn test_plan_words_in_prose_are_not_plans() {
        assert!(match_lot_block_plan("Lot 3, Block 2, planning approval pending").is_none());
        assert!(match_lot_block_plan("Lot 3 Block 2, plan to subdivide").is_none());
        assert!(match_plan_block_lot("planning block 2 lot 3").is_none());
        assert!(match_parcel_plan("Parcel A, plan to subdivide").is_none());
        assert!(match_parcel_plan("parcels planned").is_none());
    }

    #[test]
    fn test_no_match() {
        assert!(match_lot_block_plan("Lot 14 near the lake").is_none());
        assert!(match_plan_block_lot("plan to develop cottages").is_none());
        assert!(match_parcel_plan("parcel of land").is_none());
    }
}
