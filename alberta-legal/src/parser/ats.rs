//! Matchers ATS (Alberta Township System)
//!
//! Trois écritures reconnues:
//! - forme courte: `NE 12-45-26-W4M`, `SW-3-50-1-W5`, `12-45-26-W4`
//! - forme longue: `NE 1/4 SECTION 12, TOWNSHIP 45, RANGE 26, W4M`
//! - forme des titres fonciers: `MERIDIAN 4 RANGE 26 TOWNSHIP 45 SECTION 12 QUARTER NORTH EAST`

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::types::{
    BoundsWarning, Coordinates, LegalDescription, LegalDescriptionFields, Meridian,
    MeridianDirection, Quarter, TownshipDescription,
};

/// Bornes de la grille ATS pour l'Alberta
pub const SECTION_BOUNDS: (u32, u32) = (1, 36);
pub const TOWNSHIP_BOUNDS: (u32, u32) = (1, 126);
pub const RANGE_BOUNDS: (u32, u32) = (1, 34);
pub const MERIDIAN_BOUNDS: (u32, u32) = (4, 6);

/// Latitude de la ligne de base du township 1 (49e parallèle)
const BASE_LATITUDE: f64 = 49.0;
/// Hauteur d'un township (~9,7 km, allocations routières comprises)
const TOWNSHIP_DEG_LAT: f64 = 0.0872;
/// Largeur d'un range (~9,7 km)
const RANGE_KM: f64 = 9.7;
const KM_PER_DEG_LAT: f64 = 111.2;

const QUARTER_ALTERNATIVES: &str =
    r"NORTH\s*EAST|NORTH\s*WEST|SOUTH\s*EAST|SOUTH\s*WEST|NE|NW|SE|SW|N|S|E|W";

fn short_form() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)(?:\b(NE|NW|SE|SW|N|S|E|W)[\s\-]*|\b)(\d{1,2})\s*-\s*(\d{1,3})\s*-\s*(\d{1,3})\s*-\s*([WE])\s*(\d)(?:\s*M)?\b",
        )
        .expect("ATS short form regex is valid")
    })
}

fn long_form() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let pattern = format!(
            r"(?i)(?:\b({q})\s*(?:1/4|QUARTER|QTR\.?)?\s*(?:OF\s+)?)?\bSEC(?:TION)?\.?\s*(\d{{1,2}})\s*,?\s*(?:TOWNSHIP|TWP\.?)\s*(\d{{1,3}})\s*,?\s*(?:RANGE|RGE\.?)\s*(\d{{1,3}})\s*,?\s*(?:([WE])\s*(\d)(?:\s*M)?\b|(WEST|EAST)\s+OF\s+(?:THE\s+)?(\d)(?:ST|ND|RD|TH)?\s+MERIDIAN)",
            q = QUARTER_ALTERNATIVES
        );
        Regex::new(&pattern).expect("ATS long form regex is valid")
    })
}

fn title_form() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let pattern = format!(
            r"(?i)\bMERIDIAN\s*(\d)\s*,?\s*RANGE\s*(\d{{1,3}})\s*,?\s*TOWNSHIP\s*(\d{{1,3}})\s*,?\s*SECTION\s*(\d{{1,2}})(?:\s*,?\s*(?:QUARTER|QTR\.?)\s*({q})\b)?",
            q = QUARTER_ALTERNATIVES
        );
        Regex::new(&pattern).expect("ATS title form regex is valid")
    })
}

/// Forme courte `NE 12-45-26-W4M`
pub fn match_short_form(text: &str) -> Option<LegalDescriptionFields> {
    short_form().captures_iter(text).find_map(|caps| {
        build(
            &caps,
            caps.get(1).map(|m| m.as_str()),
            caps.get(2)?.as_str(),
            caps.get(3)?.as_str(),
            caps.get(4)?.as_str(),
            caps.get(5)?.as_str(),
            caps.get(6)?.as_str(),
        )
    })
}

/// Forme longue `SECTION 12, TOWNSHIP 45, RANGE 26, W4M`
pub fn match_long_form(text: &str) -> Option<LegalDescriptionFields> {
    long_form().captures_iter(text).find_map(|caps| {
        let (direction, meridian) = match (caps.get(5), caps.get(6)) {
            (Some(d), Some(m)) => (d.as_str(), m.as_str()),
            _ => (caps.get(7)?.as_str(), caps.get(8)?.as_str()),
        };
        build(
            &caps,
            caps.get(1).map(|m| m.as_str()),
            caps.get(2)?.as_str(),
            caps.get(3)?.as_str(),
            caps.get(4)?.as_str(),
            direction,
            meridian,
        )
    })
}

/// Forme des titres fonciers (méridien ouest implicite)
pub fn match_title_form(text: &str) -> Option<LegalDescriptionFields> {
    title_form().captures_iter(text).find_map(|caps| {
        build(
            &caps,
            caps.get(5).map(|m| m.as_str()),
            caps.get(4)?.as_str(),
            caps.get(3)?.as_str(),
            caps.get(2)?.as_str(),
            "W",
            caps.get(1)?.as_str(),
        )
    })
}

fn build(
    caps: &Captures<'_>,
    quarter: Option<&str>,
    section: &str,
    township: &str,
    range: &str,
    direction: &str,
    meridian: &str,
) -> Option<LegalDescriptionFields> {
    let quarter = match quarter {
        Some(q) => Some(q.parse::<Quarter>().ok()?),
        None => None,
    };
    let direction = match direction.chars().next()?.to_ascii_uppercase() {
        'W' => MeridianDirection::West,
        'E' => MeridianDirection::East,
        _ => return None,
    };

    let township = TownshipDescription {
        quarter,
        section: section.parse().ok()?,
        township: township.parse().ok()?,
        range: range.parse().ok()?,
        meridian: Meridian {
            direction,
            number: meridian.parse().ok()?,
        },
    };

    let description = if township.quarter.is_some() {
        LegalDescription::QuarterSection(township)
    } else {
        LegalDescription::Section(township)
    };

    Some(LegalDescriptionFields {
        description,
        matched_text: caps.get(0)?.as_str().trim().to_string(),
        warnings: township.validate(),
    })
}

impl TownshipDescription {
    /// Liste les valeurs hors des bornes albertaines
    ///
    /// Une valeur hors bornes ne fait pas échouer la correspondance.
    pub fn validate(&self) -> Vec<BoundsWarning> {
        let checks = [
            ("section", u32::from(self.section), SECTION_BOUNDS),
            ("township", u32::from(self.township), TOWNSHIP_BOUNDS),
            ("range", u32::from(self.range), RANGE_BOUNDS),
            ("meridian", u32::from(self.meridian.number), MERIDIAN_BOUNDS),
        ];

        checks
            .into_iter()
            .filter(|(_, value, (min, max))| value < min || value > max)
            .map(|(field, value, (min, max))| BoundsWarning {
                field: field.to_string(),
                value,
                min,
                max,
            })
            .collect()
    }

    /// Coordonnée approximative du centre du quart (ou de la section)
    ///
    /// Grille idéale: pas de correction de ligne de correction ni d'allocation
    /// routière exacte. Sert uniquement au repli par centroïde le plus proche.
    pub fn approximate_coordinate(&self) -> Option<Coordinates> {
        if self.meridian.direction != MeridianDirection::West
            || self.section == 0
            || self.section > 36
            || self.township == 0
            || self.range == 0
        {
            return None;
        }
        let meridian_longitude = match self.meridian.number {
            1 => -97.457,
            2 => -102.0,
            3 => -106.0,
            4 => -110.005,
            5 => -114.0,
            6 => -118.0,
            _ => return None,
        };

        // Sections numérotées en serpentin depuis le coin sud-est
        let index = u32::from(self.section) - 1;
        let row = f64::from(index / 6);
        let position = index % 6;
        let column_from_east = if (index / 6) % 2 == 0 {
            f64::from(position)
        } else {
            f64::from(5 - position)
        };

        let (quarter_north, quarter_west) = self.quarter.map(Quarter::offset).unwrap_or((0.0, 0.0));

        let township_rows = f64::from(self.township - 1) + (row + 0.5 + quarter_north) / 6.0;
        let latitude = BASE_LATITUDE + township_rows * TOWNSHIP_DEG_LAT;

        let range_columns =
            f64::from(self.range - 1) + (column_from_east + 0.5 + quarter_west) / 6.0;
        let west_km = range_columns * RANGE_KM;
        let km_per_deg_lon = KM_PER_DEG_LAT * latitude.to_radians().cos();
        let longitude = meridian_longitude - west_km / km_per_deg_lon;

        Some(Coordinates::new(latitude, longitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn township_of(fields: &LegalDescriptionFields) -> TownshipDescription {
        *fields.description.township().expect("ATS description")
    }

    #[test]
    fn test_short_form_reference_example() {
        let fields = match_short_form("NE 12-45-26-W4M").unwrap();
        assert!(matches!(fields.description, LegalDescription::QuarterSection(_)));
        let t = township_of(&fields);
        assert_eq!(t.quarter, Some(Quarter::Ne));
        assert_eq!(t.section, 12);
        assert_eq!(t.township, 45);
        assert_eq!(t.range, 26);
        assert_eq!(t.meridian.to_string(), "W4M");
        assert_eq!(fields.matched_text, "NE 12-45-26-W4M");
        assert!(fields.warnings.is_empty());
    }

    #[test]
    fn test_short_form_with_surrounding_text() {
        let fields =
            match_short_form("Farm land, legal: sw-3-50-1-w5, title clear as of 2023").unwrap();
        let t = township_of(&fields);
        assert_eq!(t.quarter, Some(Quarter::Sw));
        assert_eq!(t.section, 3);
        assert_eq!(t.township, 50);
        assert_eq!(t.range, 1);
        assert_eq!(t.meridian, Meridian::west(5));
    }

    #[test]
    fn test_short_form_compact_quarter() {
        let t = township_of(&match_short_form("NE12-45-26-W4").unwrap());
        assert_eq!(t.quarter, Some(Quarter::Ne));
        assert_eq!(t.section, 12);
    }

    #[test]
    fn test_short_form_without_quarter_is_section() {
        let fields = match_short_form("Section 12-45-26-W4M").unwrap();
        assert!(matches!(fields.description, LegalDescription::Section(_)));
        assert_eq!(township_of(&fields).quarter, None);
    }

    #[test]
    fn test_short_form_no_match() {
        assert!(match_short_form("Property near Lacombe").is_none());
        assert!(match_short_form("12-45-26").is_none());
        assert!(match_short_form("").is_none());
    }

    #[test]
    fn test_long_form() {
        let fields =
            match_long_form("NE 1/4 Section 12, Township 45, Range 26, W4M").unwrap();
        let t = township_of(&fields);
        assert_eq!(t.quarter, Some(Quarter::Ne));
        assert_eq!((t.section, t.township, t.range), (12, 45, 26));
        assert_eq!(t.meridian, Meridian::west(4));
    }

    #[test]
    fn test_long_form_meridian_in_words() {
        let fields =
            match_long_form("Sec. 5 Twp 50 Rge 1 West of the 5th Meridian").unwrap();
        let t = township_of(&fields);
        assert_eq!(t.quarter, None);
        assert_eq!((t.section, t.township, t.range), (5, 50, 1));
        assert_eq!(t.meridian, Meridian::west(5));
    }

    #[test]
    fn test_title_form() {
        let fields = match_title_form(
            "MERIDIAN 4 RANGE 26 TOWNSHIP 45 SECTION 12 QUARTER NORTH EAST EXCEPTING THEREOUT",
        )
        .unwrap();
        let t = township_of(&fields);
        assert_eq!(t.quarter, Some(Quarter::Ne));
        assert_eq!((t.section, t.township, t.range), (12, 45, 26));
        assert_eq!(t.meridian, Meridian::west(4));
    }

    #[test]
    fn test_out_of_range_values_are_flagged_not_rejected() {
        let fields = match_short_form("NE 40-45-99-W8M").unwrap();
        let fields_with_warning: Vec<_> = fields.warnings.iter().map(|w| w.field.as_str()).collect();
        assert_eq!(fields_with_warning, vec!["section", "range", "meridian"]);
        assert_eq!(fields.warnings[1].to_string(), "range 99 outside 1..=34");
    }

    #[test]
    fn test_approximate_coordinate_near_red_deer() {
        let t = township_of(&match_short_form("SW 20-38-27-W4M").unwrap());
        let c = t.approximate_coordinate().unwrap();
        assert!((c.latitude - 52.27).abs() < 0.05, "lat {}", c.latitude);
        assert!((c.longitude + 113.82).abs() < 0.05, "lon {}", c.longitude);
    }

    #[test]
    fn test_approximate_coordinate_rejects_invalid_grid() {
        let t = TownshipDescription {
            quarter: None,
            section: 40,
            township: 45,
            range: 26,
            meridian: Meridian::west(4),
        };
        assert!(t.approximate_coordinate().is_none());

        let east = TownshipDescription {
            section: 1,
            meridian: Meridian {
                direction: MeridianDirection::East,
                number: 1,
            },
            ..t
        };
        assert!(east.approximate_coordinate().is_none());
    }
}
