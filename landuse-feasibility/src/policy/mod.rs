//! Politiques d'utilisation du sol
//!
//! Données indicatives: le district est déduit des caractéristiques du bien,
//! les règles associées sont celles d'un règlement albertain type. Aucune
//! donnée municipale n'est interrogée en ligne.

pub mod bylaw;
pub mod requirements;
pub mod zoning;

use alberta_legal::{ContactInfo, MunicipalityRecord, PropertyDetails};
use serde::{Deserialize, Serialize};

pub use bylaw::BylawSummary;
pub use zoning::{DensityRestrictions, HeightRestrictions, Setbacks, ZoningDistrict};

/// Politiques applicables à un bien dans une municipalité
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyInfo {
    pub municipality: String,
    pub zoning: ZoningDistrict,
    /// `RC - Rural Commercial`
    pub zoning_label: String,
    pub permitted_uses: Vec<String>,
    pub discretionary_uses: Vec<String>,
    pub setbacks: Setbacks,
    pub density_restrictions: DensityRestrictions,
    pub height_restrictions: HeightRestrictions,
    pub land_use_bylaw: BylawSummary,
    pub development_requirements: Vec<String>,
    pub contact: ContactInfo,
}

impl PolicyInfo {
    pub fn retrieve(record: &MunicipalityRecord, details: &PropertyDetails) -> Self {
        let zoning = ZoningDistrict::determine(details);

        tracing::debug!(
            municipality = %record.name,
            zoning = zoning.code(),
            acreage = ?details.acreage,
            "Policy retrieved"
        );

        Self {
            municipality: record.name.clone(),
            zoning,
            zoning_label: zoning.label(),
            permitted_uses: to_strings(zoning.permitted_uses()),
            discretionary_uses: to_strings(zoning.discretionary_uses()),
            setbacks: zoning.setbacks(),
            density_restrictions: zoning.density(),
            height_restrictions: zoning.height(),
            land_use_bylaw: BylawSummary::for_municipality(record),
            development_requirements: requirements::development_requirements(record, zoning),
            contact: record.contact.clone(),
        }
    }
}

/// Détails d'une municipalité exposés par l'API
#[derive(Debug, Clone, Serialize)]
pub struct MunicipalityDetails<'a> {
    #[serde(flatten)]
    pub record: &'a MunicipalityRecord,
    pub supported_services: &'static [&'static str],
    pub typical_processing_times: ProcessingTimes,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProcessingTimes {
    pub development_permit: &'static str,
    pub subdivision: &'static str,
    pub rezoning: &'static str,
}

impl<'a> MunicipalityDetails<'a> {
    pub fn new(record: &'a MunicipalityRecord) -> Self {
        Self {
            record,
            supported_services: &[
                "Land Use Bylaw Information",
                "Zoning Maps",
                "Development Permits",
                "Subdivision Applications",
                "Planning Consultation",
            ],
            typical_processing_times: ProcessingTimes {
                development_permit: "4-6 weeks",
                subdivision: "3-6 months",
                rezoning: "6-12 months",
            },
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alberta_legal::MunicipalityRegistry;

    #[test]
    fn test_retrieve_rural_commercial_county() {
        let registry = MunicipalityRegistry::alberta().unwrap();
        let county = registry.find_by_name("Ponoka County").unwrap();
        let details = PropertyDetails {
            acreage: Some(14.55),
            zoning_hints: vec!["commercial".into(), "rural".into()],
            ..Default::default()
        };

        let policy = PolicyInfo::retrieve(county, &details);
        assert_eq!(policy.zoning, ZoningDistrict::RuralCommercial);
        assert_eq!(policy.zoning_label, "RC - Rural Commercial");
        assert!(policy.discretionary_uses.contains(&"Cottage development".to_string()));
        assert!(policy
            .development_requirements
            .contains(&"County road access approval".to_string()));
        assert_eq!(policy.contact.phone, "403-783-3333");
    }

    #[test]
    fn test_municipality_details_flatten() {
        let registry = MunicipalityRegistry::alberta().unwrap();
        let record = registry.find_by_name("Edmonton").unwrap();
        let json = serde_json::to_value(MunicipalityDetails::new(record)).unwrap();
        assert_eq!(json["name"], "Edmonton");
        assert_eq!(json["type"], "city");
        assert_eq!(json["typical_processing_times"]["rezoning"], "6-12 months");
        assert_eq!(json["supported_services"].as_array().unwrap().len(), 5);
    }
}
