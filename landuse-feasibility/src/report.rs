//! Rapport de faisabilité
//!
//! Le rapport est sauvegardé en JSON (données complètes) et en texte
//! (document lisible). Le nom de fichier combine l'horodatage et un
//! identifiant dérivé du contenu de la saisie:
//! `land_use_report_<YYYYMMDD_HHMMSS>_<id>.{json,txt}`.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use alberta_legal::{Resolution, UnresolvedReason};

use crate::analysis::PropertyAnalysis;

/// Longueur de l'identifiant (caractères hexadécimaux)
const ID_LEN: usize = 12;

const DISCLAIMER: &str = "This report is based on publicly available information and automated \
analysis. It is intended for preliminary assessment purposes only. All information should be \
verified with the appropriate municipal authorities before making any development decisions. \
This report does not constitute professional planning or legal advice.";

const ADDITIONAL_CONSIDERATIONS: &[&str] = &[
    "Engage a qualified land use planner for detailed analysis",
    "Conduct environmental due diligence assessments",
    "Verify all utility capacities and connection costs",
    "Review neighboring property developments and restrictions",
    "Consider market analysis for proposed development type",
    "Evaluate financing options and development timeline",
];

/// Chemins des fichiers écrits
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportFiles {
    pub json: PathBuf,
    pub text: PathBuf,
}

/// Rapport complet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeasibilityReport {
    /// Identifiant dérivé de la saisie (blake3, hex tronqué)
    pub id: String,
    pub generated_at: DateTime<Utc>,
    pub analysis: PropertyAnalysis,
}

impl FeasibilityReport {
    pub fn new(analysis: PropertyAnalysis) -> Self {
        Self {
            id: report_id(&analysis),
            generated_at: Utc::now(),
            analysis,
        }
    }

    /// Nom de fichier sans extension
    pub fn file_stem(&self) -> String {
        format!(
            "land_use_report_{}_{}",
            self.generated_at.format("%Y%m%d_%H%M%S"),
            self.id
        )
    }

    /// Sauvegarde le rapport (JSON + texte) dans `dir`, créé si besoin
    pub fn save(&self, dir: &Path) -> Result<ReportFiles> {
        std::fs::create_dir_all(dir)
            .context(format!("Failed to create reports directory: {}", dir.display()))?;

        let stem = self.file_stem();
        let files = ReportFiles {
            json: dir.join(format!("{}.json", stem)),
            text: dir.join(format!("{}.txt", stem)),
        };

        self.save_to_file(&files.json)?;
        std::fs::write(&files.text, self.render_text())
            .context(format!("Failed to write report: {}", files.text.display()))?;

        tracing::info!(
            id = %self.id,
            json = %files.json.display(),
            text = %files.text.display(),
            "Report saved"
        );
        Ok(files)
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .context(format!("Failed to write report: {}", path.display()))?;
        Ok(())
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("{}", self.render_text());
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "{}: {} ({}), potential {}",
            self.id,
            self.analysis.municipality_name().unwrap_or("unresolved"),
            self.analysis
                .policy
                .as_ref()
                .map(|p| p.zoning.code())
                .unwrap_or("no zoning"),
            self.analysis.feasibility_summary.development_potential
        )
    }

    /// Document texte complet
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        // L'écriture dans une String ne peut pas échouer
        let _ = self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        let analysis = &self.analysis;
        let property = &analysis.property;
        let rule = "=".repeat(60);

        writeln!(out, "{}", rule)?;
        writeln!(out, "LAND USE FEASIBILITY STUDY")?;
        writeln!(out, "{}", rule)?;
        writeln!(out, "Report ID: {}", self.id)?;
        writeln!(out, "Report Date: {}", self.generated_at.format("%B %d, %Y"))?;
        writeln!(out, "Report Type: Preliminary Feasibility Assessment")?;
        let address = property.descriptor.address.trim();
        writeln!(
            out,
            "Property: {}",
            if address.is_empty() { "Property Address Not Available" } else { address }
        )?;
        writeln!(
            out,
            "Municipality: {}",
            analysis.municipality_name().unwrap_or("Municipality Not Identified")
        )?;
        writeln!(out, "\nDISCLAIMER: {}", DISCLAIMER)?;

        // Synthèse
        writeln!(out, "\n--- EXECUTIVE SUMMARY ---")?;
        writeln!(
            out,
            "Development Potential: {}",
            analysis.feasibility_summary.development_potential
        )?;
        if let Some(policy) = &analysis.policy {
            writeln!(out, "Zoning: {}", policy.zoning_label)?;
        }
        for consideration in &analysis.feasibility_summary.key_considerations {
            writeln!(out, "  - {}", consideration)?;
        }
        for issue in &property.issues {
            writeln!(out, "  ! {}", issue)?;
        }

        // Propriété
        writeln!(out, "\n--- PROPERTY ---")?;
        match &property.legal {
            Some(legal) => {
                writeln!(out, "Legal Description: {} ({})", legal.description, legal.description.kind_name())?;
                for warning in &legal.warnings {
                    writeln!(out, "  warning: {}", warning)?;
                }
            }
            None => writeln!(out, "Legal Description: not recognised")?,
        }
        if let Some(parsed) = &property.address {
            if let Some(postal) = &parsed.postal_code {
                writeln!(out, "Postal Code: {}", postal)?;
            }
        }
        if let Some(acreage) = property.details.acreage {
            writeln!(out, "Acreage: {} acres", acreage)?;
        }
        if !property.details.development_intentions.is_empty() {
            writeln!(
                out,
                "Development Intentions: {}",
                property.details.development_intentions.join(", ")
            )?;
        }
        if !property.details.infrastructure_mentions.is_empty() {
            writeln!(
                out,
                "Infrastructure: {}",
                property.details.infrastructure_mentions.join(", ")
            )?;
        }
        if let Some(coordinate) = &property.coordinate {
            writeln!(
                out,
                "Coordinate: {:.4}, {:.4} ({:?})",
                coordinate.coordinates.latitude, coordinate.coordinates.longitude, coordinate.source
            )?;
        }

        // Municipalité
        writeln!(out, "\n--- MUNICIPALITY ---")?;
        match &property.resolution {
            Resolution::Resolved {
                municipality,
                confidence,
                distance_km,
            } => {
                writeln!(out, "Name: {} ({})", municipality.name, municipality.kind)?;
                write!(out, "Match: {:?}", confidence)?;
                if let Some(d) = distance_km {
                    write!(out, " ({:.1} km from centroid)", d)?;
                }
                writeln!(out)?;
                writeln!(out, "Website: {}", municipality.website)?;
                writeln!(out, "Planning: {}", municipality.planning_email)?;
                writeln!(out, "Phone: {}", municipality.contact.phone)?;
                writeln!(out, "Address: {}", municipality.contact.address)?;
            }
            Resolution::Unresolved { reason } => match reason {
                UnresolvedReason::NoMatch => writeln!(out, "Not identified")?,
                UnresolvedReason::Ambiguous { candidates } => {
                    writeln!(out, "Ambiguous: {}", candidates.join(", "))?
                }
                UnresolvedReason::TooFar {
                    nearest,
                    distance_km,
                } => writeln!(out, "Not identified (nearest {} at {:.1} km)", nearest, distance_km)?,
            },
        }

        // Zonage et politiques
        if let Some(policy) = &analysis.policy {
            writeln!(out, "\n--- ZONING AND POLICY ---")?;
            writeln!(out, "Zoning District: {}", policy.zoning_label)?;
            write_list(out, "Permitted Uses", &policy.permitted_uses)?;
            write_list(out, "Discretionary Uses", &policy.discretionary_uses)?;
            writeln!(out, "Setbacks: {}", policy.setbacks.describe())?;
            if !policy.density_restrictions.is_empty() {
                writeln!(out, "Density: {}", policy.density_restrictions.describe())?;
            }
            writeln!(
                out,
                "Height: {}, {} stories",
                policy.height_restrictions.maximum_height, policy.height_restrictions.maximum_stories
            )?;
            write_list(out, "Development Requirements", &policy.development_requirements)?;
            writeln!(out, "{}: {}", policy.land_use_bylaw.title, policy.land_use_bylaw.url)?;
        }

        // Chalets
        if let Some(cottages) = &analysis.cottage_analysis {
            writeln!(out, "\n--- DEVELOPMENT ANALYSIS ---")?;
            writeln!(out, "Development Feasibility: {}", cottages.feasibility)?;
            if let Some(potential) = &cottages.cottage_potential {
                writeln!(out, "Total Acreage: {}", potential.total_acreage)?;
                writeln!(out, "Developable Acreage: {:.2}", potential.developable_acreage)?;
                writeln!(out, "Estimated Cottage Units: {}", potential.estimated_cottage_units)?;
                writeln!(out, "Recommended Phase 1: {}", potential.recommended_phase_1)?;
            }
            write_list(out, "Regulatory Considerations", &cottages.regulatory_considerations)?;
        }

        // Recommandations
        writeln!(out, "\n--- RECOMMENDATIONS AND NEXT STEPS ---")?;
        for (i, action) in analysis.feasibility_summary.recommended_actions.iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, action)?;
        }
        if let Some(cottages) = &analysis.cottage_analysis {
            for step in &cottages.next_steps {
                writeln!(out, "  - {}", step)?;
            }
        }
        writeln!(out, "\nAdditional Considerations:")?;
        for consideration in ADDITIONAL_CONSIDERATIONS {
            writeln!(out, "  - {}", consideration)?;
        }

        // Références
        writeln!(out, "\n--- DATA SOURCES AND REFERENCES ---")?;
        writeln!(out, "  - Alberta Land-use Framework (landuse.alberta.ca)")?;
        writeln!(out, "  - Municipal Government Act (MGA)")?;
        writeln!(out, "  - Alberta Building Code")?;
        if let Some(municipality) = property.municipality() {
            writeln!(out, "  - Municipality Website: {}", municipality.website)?;
            writeln!(out, "  - Land Use Bylaw: {}", municipality.land_use_bylaw)?;
        }
        writeln!(out, "{}", rule)
    }
}

fn write_list(out: &mut String, title: &str, items: &[String]) -> std::fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(out, "{}:", title)?;
    for item in items {
        writeln!(out, "  - {}", item)?;
    }
    Ok(())
}

/// Identifiant stable pour une même saisie
fn report_id(analysis: &PropertyAnalysis) -> String {
    let bytes = serde_json::to_vec(&analysis.property.descriptor).unwrap_or_default();
    let hash = blake3::hash(&bytes);
    let mut id = hex::encode(hash.as_bytes());
    id.truncate(ID_LEN);
    id
}
