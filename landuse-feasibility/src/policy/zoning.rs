//! Districts de zonage et règles associées

use alberta_legal::PropertyDetails;
use serde::{Deserialize, Serialize};

/// Superficie au-delà de laquelle un bien commercial devient Rural Commercial
const RURAL_COMMERCIAL_MIN_ACRES: f64 = 5.0;
/// Superficie au-delà de laquelle un bien devient Rural Residential
const RURAL_RESIDENTIAL_MIN_ACRES: f64 = 2.0;

/// District de zonage probable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoningDistrict {
    #[serde(rename = "R1")]
    SingleFamilyResidential,
    #[serde(rename = "C2")]
    CommunityCommercial,
    #[serde(rename = "RC")]
    RuralCommercial,
    #[serde(rename = "RUR")]
    RuralResidential,
}

impl ZoningDistrict {
    /// Détermine le district à partir des indices et de la superficie
    pub fn determine(details: &PropertyDetails) -> Self {
        let acreage = details.acreage.unwrap_or(0.0);

        if details.has_zoning_hint("commercial") {
            if acreage > RURAL_COMMERCIAL_MIN_ACRES {
                Self::RuralCommercial
            } else {
                Self::CommunityCommercial
            }
        } else if details.has_zoning_hint("rural") || acreage > RURAL_RESIDENTIAL_MIN_ACRES {
            Self::RuralResidential
        } else {
            Self::SingleFamilyResidential
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::SingleFamilyResidential => "R1",
            Self::CommunityCommercial => "C2",
            Self::RuralCommercial => "RC",
            Self::RuralResidential => "RUR",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::SingleFamilyResidential => "Single Family Residential",
            Self::CommunityCommercial => "Community Commercial",
            Self::RuralCommercial => "Rural Commercial",
            Self::RuralResidential => "Rural Residential",
        }
    }

    /// `RC - Rural Commercial`
    pub fn label(self) -> String {
        format!("{} - {}", self.code(), self.name())
    }

    pub fn is_commercial(self) -> bool {
        matches!(self, Self::CommunityCommercial | Self::RuralCommercial)
    }

    pub fn is_rural(self) -> bool {
        matches!(self, Self::RuralCommercial | Self::RuralResidential)
    }

    pub fn permitted_uses(self) -> &'static [&'static str] {
        match self {
            Self::RuralCommercial => &[
                "Tourist accommodation",
                "Recreation facilities",
                "Small scale retail",
                "Restaurants",
                "Bed and breakfast",
            ],
            Self::CommunityCommercial => &["Retail stores", "Restaurants", "Offices", "Personal services"],
            Self::RuralResidential => &[
                "Single family dwelling",
                "Home occupation",
                "Agriculture (limited)",
                "Accessory buildings",
            ],
            Self::SingleFamilyResidential => &[
                "Single family dwelling",
                "Home occupation",
                "Accessory buildings",
            ],
        }
    }

    pub fn discretionary_uses(self) -> &'static [&'static str] {
        match self {
            Self::RuralCommercial => &[
                "Cottage development",
                "RV parks",
                "Event facilities",
                "Conference centers",
            ],
            Self::RuralResidential => &["Bed and breakfast", "Secondary suite", "Small scale tourism"],
            Self::CommunityCommercial | Self::SingleFamilyResidential => &[],
        }
    }

    pub fn setbacks(self) -> Setbacks {
        let (front, rear, side) = match self {
            Self::SingleFamilyResidential => ("7.5 meters", "7.5 meters", "1.5 meters"),
            Self::RuralCommercial => ("15 meters", "15 meters", "7.5 meters"),
            Self::RuralResidential => ("30 meters", "15 meters", "15 meters"),
            Self::CommunityCommercial => ("6 meters", "6 meters", "3 meters"),
        };
        Setbacks {
            front: front.to_string(),
            rear: rear.to_string(),
            side: side.to_string(),
        }
    }

    /// Emprise maximale au sol (fraction de la parcelle)
    pub fn max_site_coverage(self) -> Option<f64> {
        match self {
            Self::RuralCommercial => Some(0.40),
            Self::RuralResidential => Some(0.25),
            Self::SingleFamilyResidential => Some(0.35),
            Self::CommunityCommercial => None,
        }
    }

    pub fn density(self) -> DensityRestrictions {
        let coverage = self
            .max_site_coverage()
            .map(|c| format!("{}%", (c * 100.0).round()));
        match self {
            Self::RuralCommercial => DensityRestrictions {
                maximum_site_coverage: coverage,
                maximum_floor_area_ratio: Some("0.5".into()),
                minimum_lot_size: Some("2 hectares".into()),
                maximum_dwelling_units: None,
            },
            Self::RuralResidential => DensityRestrictions {
                maximum_site_coverage: coverage,
                maximum_floor_area_ratio: None,
                minimum_lot_size: Some("2 hectares".into()),
                maximum_dwelling_units: Some("1 per lot".into()),
            },
            Self::SingleFamilyResidential => DensityRestrictions {
                maximum_site_coverage: coverage,
                maximum_floor_area_ratio: None,
                minimum_lot_size: Some("600 square meters".into()),
                maximum_dwelling_units: Some("1 per lot".into()),
            },
            Self::CommunityCommercial => DensityRestrictions::default(),
        }
    }

    pub fn height(self) -> HeightRestrictions {
        let (maximum_height, maximum_stories) = if self.is_commercial() {
            ("12 meters", "3")
        } else if self.is_rural() {
            ("10 meters", "2.5")
        } else {
            ("9 meters", "2.5")
        };
        HeightRestrictions {
            maximum_height: maximum_height.to_string(),
            maximum_stories: maximum_stories.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setbacks {
    pub front: String,
    pub rear: String,
    pub side: String,
}

impl Setbacks {
    pub fn describe(&self) -> String {
        format!("front {}, rear {}, side {}", self.front, self.rear, self.side)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DensityRestrictions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_site_coverage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_floor_area_ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_lot_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_dwelling_units: Option<String>,
}

impl DensityRestrictions {
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Paires (libellé, valeur) des restrictions renseignées
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("maximum site coverage", &self.maximum_site_coverage),
            ("maximum floor area ratio", &self.maximum_floor_area_ratio),
            ("minimum lot size", &self.minimum_lot_size),
            ("maximum dwelling units", &self.maximum_dwelling_units),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| (label, v)))
        .collect()
    }

    pub fn describe(&self) -> String {
        self.entries()
            .iter()
            .map(|(label, value)| format!("{} {}", label, value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeightRestrictions {
    pub maximum_height: String,
    pub maximum_stories: String,
}
