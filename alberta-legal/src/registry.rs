//! Registre des municipalités
//!
//! Chargé une fois au démarrage puis partagé en lecture seule. Le preset
//! embarqué couvre le centre de l'Alberta; un fichier JSON de même forme
//! peut le remplacer:
//!
//! ```json
//! { "municipalities": [ { "name": "Red Deer", "type": "city", ... } ] }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LegalError;
use crate::normalize::normalize;
use crate::types::MunicipalityRecord;

const ALBERTA_PRESET: &str = include_str!("presets/alberta.json");

#[derive(Debug, Deserialize, Serialize)]
struct RegistryFile {
    municipalities: Vec<MunicipalityRecord>,
}

/// Ensemble fixe et énumérable des juridictions
#[derive(Debug, Clone)]
pub struct MunicipalityRegistry {
    records: Vec<MunicipalityRecord>,
    /// Noms normalisés, même ordre que `records`
    normalized_names: Vec<String>,
}

impl MunicipalityRegistry {
    /// Registre embarqué (villes et comtés du centre de l'Alberta)
    pub fn alberta() -> Result<Self, LegalError> {
        Self::from_json(ALBERTA_PRESET)
    }

    /// Charge un registre depuis un fichier JSON
    pub fn load(path: &Path) -> Result<Self, LegalError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, LegalError> {
        let file: RegistryFile = serde_json::from_str(json)?;
        Self::from_records(file.municipalities)
    }

    /// Valide puis construit le registre
    ///
    /// Rejette les noms vides, les doublons (après normalisation) et les
    /// centroïdes hors des plages de latitude/longitude.
    pub fn from_records(records: Vec<MunicipalityRecord>) -> Result<Self, LegalError> {
        if records.is_empty() {
            return Err(LegalError::EmptyRegistry);
        }

        let mut seen = HashSet::with_capacity(records.len());
        let mut normalized_names = Vec::with_capacity(records.len());

        for record in &records {
            let normalized = normalize(&record.name);
            if normalized.is_empty() {
                return Err(LegalError::invalid_record(&record.name, "empty name"));
            }

            let c = record.centroid;
            if !(-90.0..=90.0).contains(&c.latitude) || !(-180.0..=180.0).contains(&c.longitude) {
                return Err(LegalError::invalid_record(
                    &record.name,
                    format!("centroid ({}, {}) out of range", c.latitude, c.longitude),
                ));
            }

            if !seen.insert(normalized.clone()) {
                return Err(LegalError::DuplicateName(record.name.clone()));
            }
            normalized_names.push(normalized);
        }

        tracing::debug!(count = records.len(), "Municipality registry loaded");

        Ok(Self {
            records,
            normalized_names,
        })
    }

    pub fn records(&self) -> &[MunicipalityRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Paires (nom normalisé, enregistrement)
    pub fn entries(&self) -> impl Iterator<Item = (&str, &MunicipalityRecord)> {
        self.normalized_names
            .iter()
            .map(String::as_str)
            .zip(self.records.iter())
    }

    /// Enregistrements triés par nom
    pub fn sorted_by_name(&self) -> Vec<&MunicipalityRecord> {
        let mut sorted: Vec<_> = self.records.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        sorted
    }

    /// Recherche exacte par nom (insensible à la casse et à la ponctuation)
    pub fn find_by_name(&self, name: &str) -> Option<&MunicipalityRecord> {
        let normalized = normalize(name);
        self.entries()
            .find(|(n, _)| *n == normalized)
            .map(|(_, record)| record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MunicipalityKind;

    fn record_json(name: &str, lat: f64) -> String {
        format!(
            r#"{{"name":"{}","type":"town","centroid":{{"latitude":{},"longitude":-113.0}},
               "website":"https://example.org","planning_email":"p@example.org",
               "land_use_bylaw":"https://example.org/lub",
               "contact":{{"phone":"000","address":"Main St"}}}}"#,
            name, lat
        )
    }

    #[test]
    fn test_embedded_preset() {
        let registry = MunicipalityRegistry::alberta().unwrap();
        assert_eq!(registry.len(), 15);

        let red_deer = registry.find_by_name("red deer").unwrap();
        assert_eq!(red_deer.kind, MunicipalityKind::City);
        assert_eq!(red_deer.population, Some(100844));
        assert!(red_deer.zoning_map.is_some());

        let county = registry.find_by_name("LACOMBE COUNTY").unwrap();
        assert!(county.is_county());
        assert_eq!(county.planning_email, "planning@lacombecounty.com");

        assert!(registry.find_by_name("Calgary").is_none());
    }

    #[test]
    fn test_sorted_by_name() {
        let registry = MunicipalityRegistry::alberta().unwrap();
        let names: Vec<_> = registry.sorted_by_name().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names.first(), Some(&"Athabasca"));
        assert_eq!(names.last(), Some(&"Wetaskiwin County"));
        let mut expected = names.clone();
        expected.sort();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let json = format!(
            r#"{{"municipalities":[{},{}]}}"#,
            record_json("St. Albert", 53.6),
            record_json("st albert", 53.6)
        );
        let err = MunicipalityRegistry::from_json(&json).unwrap_err();
        assert!(matches!(err, LegalError::DuplicateName(_)));
    }

    #[test]
    fn test_invalid_centroid_rejected() {
        let json = format!(r#"{{"municipalities":[{}]}}"#, record_json("Nowhere", 123.0));
        let err = MunicipalityRegistry::from_json(&json).unwrap_err();
        assert!(matches!(err, LegalError::InvalidRecord { .. }));
    }

    #[test]
    fn test_empty_registry_rejected() {
        let err = MunicipalityRegistry::from_json(r#"{"municipalities":[]}"#).unwrap_err();
        assert!(matches!(err, LegalError::EmptyRegistry));
    }

    #[test]
    fn test_invalid_json() {
        let err = MunicipalityRegistry::from_json("{not json").unwrap_err();
        assert!(matches!(err, LegalError::InvalidJson(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");
        std::fs::write(
            &path,
            format!(r#"{{"municipalities":[{}]}}"#, record_json("Ponoka", 52.68)),
        )
        .unwrap();

        let registry = MunicipalityRegistry::load(&path).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.find_by_name("ponoka").is_some());

        let missing = MunicipalityRegistry::load(&dir.path().join("missing.json"));
        assert!(matches!(missing, Err(LegalError::Io(_))));
    }
}
