//! # alberta-legal
//!
//! Analyse des descriptions de propriétés albertaines et résolution de la
//! municipalité compétente.
//!
//! ## Features
//!
//! - Descriptions légales ATS (`NE 12-45-26-W4M`, formes longues et titres fonciers)
//! - Lot/Block/Plan et Parcel/Plan
//! - Adresses civiques et rurales, superficie et mots-clés
//! - Registre des municipalités embarqué ou chargé depuis JSON
//! - Résolution déterministe: exacte, sous-chaîne, puis centroïde le plus proche
//!
//! ## Usage
//!
//! ```rust,ignore
//! use alberta_legal::{analyze, MunicipalityRegistry, PropertyDescriptor};
//!
//! let registry = MunicipalityRegistry::alberta()?;
//! let descriptor = PropertyDescriptor::new("Property near Lacombe", "NE 12-45-26-W4M", "");
//! let result = analyze(&descriptor, &registry);
//!
//! if let Some(municipality) = result.municipality() {
//!     println!("{} ({})", municipality.name, municipality.kind);
//! }
//! ```

pub mod error;
pub mod normalize;
pub mod parser;
pub mod registry;
pub mod resolver;
pub mod types;

pub use error::LegalError;
pub use normalize::NormalizedText;
pub use registry::MunicipalityRegistry;
pub use types::{
    AddressKind, Confidence, ContactInfo, CoordinateSource, Coordinates, LegalDescription,
    LegalDescriptionFields, LocatedCoordinate, Meridian, MunicipalityKind, MunicipalityRecord,
    ParsedAddress, PropertyDescriptor, PropertyDetails, Quarter, ReportedIssue, Resolution,
    ResolutionResult, TownshipDescription, UnresolvedReason,
};

/// Analyse complète d'une description de propriété.
///
/// Pipeline linéaire: normalisation, matchers, résolution, assemblage.
/// Aucun état n'est conservé entre deux appels.
///
/// Les deux issues possibles (municipalité non résolue, aucune description
/// légale reconnue) sont listées dans `issues`; le résultat reste exploitable
/// pour un rapport partiel.
pub fn analyze(descriptor: &PropertyDescriptor, registry: &MunicipalityRegistry) -> ResolutionResult {
    // 1. Normaliser les trois champs (description légale en premier)
    let raw = [
        descriptor.legal_description.as_str(),
        descriptor.address.as_str(),
        descriptor.additional_info.as_str(),
    ];
    let texts: Vec<NormalizedText> = raw.iter().map(|t| NormalizedText::new(t)).collect();

    // 2. Description légale: premier champ reconnu
    let legal = raw.iter().find_map(|t| parser::match_legal_description(t));

    // 3. Adresse et détails
    let address = (!descriptor.address.trim().is_empty())
        .then(|| parser::address::parse(&descriptor.address));
    let details = parser::details::parse(&descriptor.additional_info);

    // 4. Coordonnée: fournie, écrite dans le texte, ou approximée depuis l'ATS
    let coordinate = locate(descriptor, &raw, legal.as_ref());

    // 5. Résolution
    let municipality_hints = resolver::municipality_hints(registry, &texts);
    let resolution = resolver::resolve(registry, &texts, coordinate);

    let mut issues = Vec::new();
    if legal.is_none() {
        issues.push(ReportedIssue::NoLegalDescriptionMatch);
    }
    if !resolution.is_resolved() {
        issues.push(ReportedIssue::UnresolvedMunicipality);
    }

    tracing::debug!(
        legal = legal.as_ref().map(|l| l.description.kind_name()),
        municipality = resolution.municipality().map(|m| m.name.as_str()),
        coordinate_source = ?coordinate.map(|c| c.source),
        issues = issues.len(),
        "Property analysed"
    );

    ResolutionResult {
        descriptor: descriptor.clone(),
        legal,
        address,
        details,
        municipality_hints,
        coordinate,
        resolution,
        issues,
    }
}

fn locate(
    descriptor: &PropertyDescriptor,
    raw: &[&str],
    legal: Option<&LegalDescriptionFields>,
) -> Option<LocatedCoordinate> {
    if let Some(coordinates) = descriptor.supplied_coordinates() {
        return Some(LocatedCoordinate {
            coordinates,
            source: CoordinateSource::Supplied,
        });
    }

    if let Some(coordinates) = raw.iter().find_map(|t| normalize::extract_coordinates(t)) {
        return Some(LocatedCoordinate {
            coordinates,
            source: CoordinateSource::Text,
        });
    }

    let coordinates = legal?.description.township()?.approximate_coordinate()?;
    Some(LocatedCoordinate {
        coordinates,
        source: CoordinateSource::LegalDescription,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_reports_both_issues() {
        let registry = MunicipalityRegistry::alberta().unwrap();
        let result = analyze(
            &PropertyDescriptor::new("Property near Nowhereville", "", ""),
            &registry,
        );
        assert!(result.legal.is_none());
        assert!(result.coordinate.is_none());
        assert_eq!(
            result.issues,
            vec![
                ReportedIssue::NoLegalDescriptionMatch,
                ReportedIssue::UnresolvedMunicipality
            ]
        );
    }

    #[test]
    fn test_coordinate_priority() {
        let registry = MunicipalityRegistry::alberta().unwrap();
        let descriptor =
            PropertyDescriptor::new("at 53.5461, -113.4938", "SW 20-38-27-W4M", "")
                .with_coordinates(52.27, -113.81);

        let supplied = analyze(&descriptor, &registry);
        assert_eq!(supplied.coordinate.unwrap().source, CoordinateSource::Supplied);

        let mut from_text = descriptor.clone();
        from_text.latitude = None;
        from_text.longitude = None;
        let result = analyze(&from_text, &registry);
        assert_eq!(result.coordinate.unwrap().source, CoordinateSource::Text);
        assert_eq!(result.municipality().unwrap().name, "Edmonton");
    }
}
