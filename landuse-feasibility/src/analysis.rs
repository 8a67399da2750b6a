//! Analyse complète d'une propriété: résolution, politiques et faisabilité

use alberta_legal::{MunicipalityRegistry, PropertyDescriptor, ResolutionResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::feasibility::{CottageAnalysis, FeasibilitySummary};
use crate::policy::PolicyInfo;

/// Sortie de `/api/analyze_property`, entrée de la génération de rapport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyAnalysis {
    pub property: ResolutionResult,

    /// Absent quand la municipalité n'est pas résolue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<PolicyInfo>,

    pub feasibility_summary: FeasibilitySummary,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cottage_analysis: Option<CottageAnalysis>,

    pub analysis_date: DateTime<Utc>,
}

impl PropertyAnalysis {
    pub fn municipality_name(&self) -> Option<&str> {
        self.property.municipality().map(|m| m.name.as_str())
    }
}

/// Analyse une propriété de bout en bout
///
/// Une municipalité non résolue donne une analyse partielle (sans politique),
/// jamais une erreur.
pub fn analyze_property(
    descriptor: &PropertyDescriptor,
    registry: &MunicipalityRegistry,
) -> PropertyAnalysis {
    let property = alberta_legal::analyze(descriptor, registry);

    let policy = property
        .municipality()
        .map(|record| PolicyInfo::retrieve(record, &property.details));
    let feasibility_summary = FeasibilitySummary::from_policy(policy.as_ref());
    let cottage_analysis = policy
        .as_ref()
        .map(|p| CottageAnalysis::analyze(p, &property.details));

    if !property.issues.is_empty() {
        tracing::info!(issues = ?property.issues, "Partial analysis");
    }

    PropertyAnalysis {
        property,
        policy,
        feasibility_summary,
        cottage_analysis,
        analysis_date: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feasibility::Rating;

    #[test]
    fn test_sample_property_analysis() {
        let registry = MunicipalityRegistry::alberta().unwrap();
        let descriptor = PropertyDescriptor::new(
            "Property north of Black Bull Golf, Lacombe County",
            "NE 12-45-26-W4M",
            "14.55 acre rural commercial property. Plan to develop cottages. Septic and power in place.",
        );

        let analysis = analyze_property(&descriptor, &registry);
        assert_eq!(analysis.municipality_name(), Some("Lacombe County"));

        let policy = analysis.policy.as_ref().unwrap();
        assert_eq!(policy.zoning_label, "RC - Rural Commercial");
        assert_eq!(analysis.feasibility_summary.development_potential, Rating::High);

        let cottages = analysis.cottage_analysis.as_ref().unwrap();
        assert_eq!(cottages.cottage_potential.as_ref().unwrap().estimated_cottage_units, 26);
    }

    #[test]
    fn test_unresolved_analysis_is_partial() {
        let registry = MunicipalityRegistry::alberta().unwrap();
        let analysis = analyze_property(
            &PropertyDescriptor::new("Property near Nowhereville", "", "3 acres"),
            &registry,
        );
        assert!(analysis.policy.is_none());
        assert!(analysis.cottage_analysis.is_none());
        assert_eq!(analysis.feasibility_summary.development_potential, Rating::Unknown);
        assert_eq!(analysis.property.details.acreage, Some(3.0));
    }

    #[test]
    fn test_analysis_json_roundtrip() {
        let registry = MunicipalityRegistry::alberta().unwrap();
        let analysis = analyze_property(&PropertyDescriptor::new("Camrose", "", ""), &registry);
        let json = serde_json::to_string(&analysis).unwrap();
        let back: PropertyAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(back.municipality_name(), Some("Camrose"));
        assert_eq!(back.policy, analysis.policy);
    }
}
