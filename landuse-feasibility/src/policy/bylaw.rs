//! Résumé du règlement d'utilisation du sol (Land Use Bylaw)

use alberta_legal::MunicipalityRecord;
use serde::{Deserialize, Serialize};

const STANDARD_SECTIONS: [(&str, &str, &str); 5] = [
    (
        "1",
        "Definitions and General Provisions",
        "Basic definitions and general requirements",
    ),
    (
        "2",
        "Zoning Districts",
        "Description of all zoning districts and their purposes",
    ),
    (
        "3",
        "General Regulations",
        "Setbacks, height limits, parking requirements",
    ),
    (
        "4",
        "Development Permits",
        "Development permit application process and requirements",
    ),
    (
        "5",
        "Subdivision",
        "Subdivision regulations and approval process",
    ),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BylawSection {
    pub section: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BylawSummary {
    pub url: String,
    pub title: String,
    pub sections: Vec<BylawSection>,
}

impl BylawSummary {
    /// Structure type d'un règlement albertain, avec le lien de la municipalité
    pub fn for_municipality(record: &MunicipalityRecord) -> Self {
        Self {
            url: record.land_use_bylaw.clone(),
            title: format!("{} Land Use Bylaw", record.name),
            sections: STANDARD_SECTIONS
                .iter()
                .map(|(section, title, description)| BylawSection {
                    section: section.to_string(),
                    title: title.to_string(),
                    description: description.to_string(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alberta_legal::MunicipalityRegistry;

    #[test]
    fn test_bylaw_summary() {
        let registry = MunicipalityRegistry::alberta().unwrap();
        let record = registry.find_by_name("Camrose").unwrap();
        let bylaw = BylawSummary::for_municipality(record);

        assert_eq!(bylaw.title, "Camrose Land Use Bylaw");
        assert_eq!(bylaw.url, "https://www.camrose.ca/government/bylaws/");
        assert_eq!(bylaw.sections.len(), 5);
        assert_eq!(bylaw.sections[1].title, "Zoning Districts");
    }
}
