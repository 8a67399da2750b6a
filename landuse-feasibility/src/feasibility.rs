//! Synthèse de faisabilité et analyse de développement de chalets

use alberta_legal::PropertyDetails;
use serde::{Deserialize, Serialize};

use crate::policy::{PolicyInfo, ZoningDistrict};

/// Superficie minimale pour chiffrer un projet de chalets
const COTTAGE_MIN_ACRES: f64 = 14.0;
/// Chalets par acre développable
const COTTAGES_PER_ACRE: f64 = 4.5;
const PHASE_1_MAX_UNITS: u32 = 5;

const RURAL_COMMERCIAL_CONSIDERATIONS: &[&str] = &[
    "Tourist accommodation is typically permitted use",
    "Development permit required for each phase",
    "Site plan approval needed",
    "Septic system capacity assessment required",
    "Water supply adequacy verification needed",
    "Fire access and safety plan required",
];

const RURAL_CONSIDERATIONS: &[&str] = &[
    "May require rezoning to Rural Commercial",
    "Discretionary use application may be possible",
    "Bed and breakfast operations typically allowed",
    "Small scale tourism may be permitted",
];

const OTHER_CONSIDERATIONS: &[&str] = &[
    "Rezoning likely required",
    "Commercial use not typically permitted",
    "Significant regulatory hurdles expected",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    High,
    Moderate,
    Low,
    Unknown,
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

impl Rating {
    /// Potentiel selon le libellé du district
    pub fn for_zoning_label(label: &str) -> Self {
        let lower = label.to_lowercase();
        if ["residential", "commercial", "mixed"].iter().any(|t| lower.contains(t)) {
            Rating::High
        } else if ["agricultural", "rural"].iter().any(|t| lower.contains(t)) {
            Rating::Moderate
        } else {
            Rating::Low
        }
    }
}

/// Synthèse de faisabilité
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeasibilitySummary {
    pub development_potential: Rating,
    pub key_considerations: Vec<String>,
    pub recommended_actions: Vec<String>,
}

impl FeasibilitySummary {
    /// Sans politique (municipalité non résolue), le potentiel est `Unknown`
    pub fn from_policy(policy: Option<&PolicyInfo>) -> Self {
        let development_potential = policy
            .map(|p| Rating::for_zoning_label(&p.zoning_label))
            .unwrap_or(Rating::Unknown);

        let mut key_considerations = Vec::new();
        if let Some(policy) = policy {
            key_considerations.push(format!(
                "Setback requirements: {}",
                policy.setbacks.describe()
            ));
            if !policy.density_restrictions.is_empty() {
                key_considerations.push(format!(
                    "Density restrictions: {}",
                    policy.density_restrictions.describe()
                ));
            }
        }

        Self {
            development_potential,
            key_considerations,
            recommended_actions: [
                "Consult with municipal planning department",
                "Review detailed zoning bylaws",
                "Consider environmental assessments if required",
                "Verify utility availability and capacity",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Potentiel chiffré d'un projet de chalets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CottagePotential {
    pub total_acreage: f64,
    pub developable_acreage: f64,
    pub estimated_cottage_units: u32,
    pub phased_development: bool,
    pub recommended_phase_1: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CottageAnalysis {
    pub feasibility: Rating,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cottage_potential: Option<CottagePotential>,
    pub regulatory_considerations: Vec<String>,
    pub next_steps: Vec<String>,
}

impl CottageAnalysis {
    pub fn analyze(policy: &PolicyInfo, details: &PropertyDetails) -> Self {
        let acreage = details.acreage.unwrap_or(0.0);

        let (feasibility, considerations) = match policy.zoning {
            ZoningDistrict::RuralCommercial => (Rating::High, RURAL_COMMERCIAL_CONSIDERATIONS),
            ZoningDistrict::RuralResidential => (Rating::Moderate, RURAL_CONSIDERATIONS),
            ZoningDistrict::SingleFamilyResidential | ZoningDistrict::CommunityCommercial => {
                (Rating::Low, OTHER_CONSIDERATIONS)
            }
        };

        let cottage_potential = match (policy.zoning, policy.zoning.max_site_coverage()) {
            (ZoningDistrict::RuralCommercial, Some(coverage)) if acreage >= COTTAGE_MIN_ACRES => {
                let developable_acreage = acreage * coverage;
                let units = (developable_acreage * COTTAGES_PER_ACRE).floor() as u32;
                Some(CottagePotential {
                    total_acreage: acreage,
                    developable_acreage,
                    estimated_cottage_units: units,
                    phased_development: true,
                    recommended_phase_1: units.min(PHASE_1_MAX_UNITS),
                })
            }
            _ => None,
        };

        Self {
            feasibility,
            cottage_potential,
            regulatory_considerations: considerations.iter().map(|s| s.to_string()).collect(),
            next_steps: [
                "Schedule pre-application meeting with planning department",
                "Obtain detailed zoning map and bylaw review",
                "Conduct environmental site assessment",
                "Verify utility capacity and availability",
                "Consult with development engineer",
                "Prepare preliminary site plan",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alberta_legal::MunicipalityRegistry;

    fn policy_for(acreage: Option<f64>, hints: &[&str]) -> (PolicyInfo, PropertyDetails) {
        let registry = MunicipalityRegistry::alberta().unwrap();
        let record = registry.find_by_name("Lacombe County").unwrap().clone();
        let details = PropertyDetails {
            acreage,
            zoning_hints: hints.iter().map(|h| h.to_string()).collect(),
            ..Default::default()
        };
        (PolicyInfo::retrieve(&record, &details), details)
    }

    #[test]
    fn test_rating_for_label() {
        assert_eq!(Rating::for_zoning_label("R1 - Single Family Residential"), Rating::High);
        assert_eq!(Rating::for_zoning_label("C2 - Community Commercial"), Rating::High);
        assert_eq!(Rating::for_zoning_label("AG - Agricultural"), Rating::Moderate);
        assert_eq!(Rating::for_zoning_label("P - Public/Institutional"), Rating::Low);
    }

    #[test]
    fn test_summary_without_policy_is_unknown() {
        let summary = FeasibilitySummary::from_policy(None);
        assert_eq!(summary.development_potential, Rating::Unknown);
        assert!(summary.key_considerations.is_empty());
        assert_eq!(summary.recommended_actions.len(), 4);
    }

    #[test]
    fn test_summary_with_policy() {
        let (policy, _) = policy_for(Some(14.55), &["commercial"]);
        let summary = FeasibilitySummary::from_policy(Some(&policy));
        assert_eq!(summary.development_potential, Rating::High);
        assert_eq!(
            summary.key_considerations[0],
            "Setback requirements: front 15 meters, rear 15 meters, side 7.5 meters"
        );
        assert_eq!(summary.key_considerations.len(), 2);
    }

    #[test]
    fn test_cottage_potential_for_large_rural_commercial() {
        let (policy, details) = policy_for(Some(14.55), &["commercial", "rural"]);
        let analysis = CottageAnalysis::analyze(&policy, &details);

        assert_eq!(analysis.feasibility, Rating::High);
        let potential = analysis.cottage_potential.unwrap();
        assert!((potential.developable_acreage - 5.82).abs() < 1e-9);
        assert_eq!(potential.estimated_cottage_units, 26);
        assert_eq!(potential.recommended_phase_1, 5);
        assert_eq!(analysis.next_steps.len(), 6);
    }

    #[test]
    fn test_small_rural_commercial_has_no_estimate() {
        let (policy, details) = policy_for(Some(8.0), &["commercial"]);
        let analysis = CottageAnalysis::analyze(&policy, &details);
        assert_eq!(analysis.feasibility, Rating::High);
        assert!(analysis.cottage_potential.is_none());
    }

    #[test]
    fn test_residential_cottage_feasibility_low() {
        let (policy, details) = policy_for(None, &[]);
        let analysis = CottageAnalysis::analyze(&policy, &details);
        assert_eq!(analysis.feasibility, Rating::Low);

        let (policy, details) = policy_for(None, &["rural"]);
        assert_eq!(CottageAnalysis::analyze(&policy, &details).feasibility, Rating::Moderate);
    }
}
