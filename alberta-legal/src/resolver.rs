//! Résolution de la municipalité
//!
//! 1. Égalité exacte d'un texte avec un nom du registre
//! 2. Nom contenu dans le texte, le plus long l'emporte
//! 3. Repli sur le centroïde le plus proche d'une coordonnée
//!
//! Deux noms distincts à égalité ne sont jamais départagés arbitrairement:
//! la coordonnée tranche si elle existe, sinon le résultat est `Ambiguous`.

use geo::{EuclideanDistance, HaversineDistance};

use crate::normalize::NormalizedText;
use crate::registry::MunicipalityRegistry;
use crate::types::{Confidence, LocatedCoordinate, MunicipalityRecord, Resolution, UnresolvedReason};

/// Rayon maximal accepté pour le repli par centroïde
pub const MAX_CENTROID_DISTANCE_KM: f64 = 50.0;

enum TextMatch<'a> {
    Unique(&'a MunicipalityRecord, Confidence),
    Ambiguous(Vec<&'a MunicipalityRecord>),
    None,
}

/// Résout les signaux de localisation en une municipalité ou un échec explicite
pub fn resolve(
    registry: &MunicipalityRegistry,
    texts: &[NormalizedText],
    coordinate: Option<LocatedCoordinate>,
) -> Resolution {
    let candidates = match match_text(registry, texts) {
        TextMatch::Unique(record, confidence) => {
            tracing::debug!(municipality = %record.name, ?confidence, "Resolved from text");
            return Resolution::Resolved {
                municipality: record.clone(),
                confidence,
                distance_km: None,
            };
        }
        TextMatch::Ambiguous(candidates) => {
            tracing::debug!(candidates = ?sorted_names(&candidates), "Ambiguous municipality names");
            Some(candidates)
        }
        TextMatch::None => None,
    };

    if let Some(located) = coordinate {
        // Une égalité se départage uniquement parmi les noms cités
        let nearest = match &candidates {
            Some(candidates) => nearest_centroid(candidates.iter().copied(), located),
            None => nearest_centroid(registry.records().iter(), located),
        };

        if let Some((record, distance_km)) = nearest {
            if distance_km <= MAX_CENTROID_DISTANCE_KM {
                tracing::debug!(
                    municipality = %record.name,
                    distance_km,
                    source = ?located.source,
                    "Resolved from nearest centroid"
                );
                return Resolution::Resolved {
                    municipality: record.clone(),
                    confidence: Confidence::NearestCentroid,
                    distance_km: Some(distance_km),
                };
            }

            if candidates.is_none() {
                return Resolution::Unresolved {
                    reason: UnresolvedReason::TooFar {
                        nearest: record.name.clone(),
                        distance_km,
                    },
                };
            }
        }
    }

    let reason = match candidates {
        Some(candidates) => UnresolvedReason::Ambiguous {
            candidates: sorted_names(&candidates),
        },
        None => UnresolvedReason::NoMatch,
    };
    Resolution::Unresolved { reason }
}

/// Noms du registre présents dans les textes, du plus long au plus court
pub fn municipality_hints(registry: &MunicipalityRegistry, texts: &[NormalizedText]) -> Vec<String> {
    let mut hits: Vec<(&str, &MunicipalityRecord)> = registry
        .entries()
        .filter(|(name, _)| texts.iter().any(|t| t.contains_phrase(name)))
        .collect();
    hits.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.1.name.cmp(&b.1.name)));
    hits.into_iter().map(|(_, r)| r.name.clone()).collect()
}

fn match_text<'a>(registry: &'a MunicipalityRegistry, texts: &[NormalizedText]) -> TextMatch<'a> {
    let exact: Vec<&MunicipalityRecord> = registry
        .entries()
        .filter(|(name, _)| texts.iter().any(|t| t.equals(name)))
        .map(|(_, record)| record)
        .collect();

    match exact.as_slice() {
        [record] => return TextMatch::Unique(*record, Confidence::Exact),
        [] => {}
        several => return TextMatch::Ambiguous(several.to_vec()),
    }

    let contained: Vec<(&str, &MunicipalityRecord)> = registry
        .entries()
        .filter(|(name, _)| texts.iter().any(|t| t.contains_phrase(name)))
        .collect();

    let Some(longest) = contained.iter().map(|(name, _)| name.len()).max() else {
        return TextMatch::None;
    };
    let winners: Vec<&MunicipalityRecord> = contained
        .into_iter()
        .filter(|(name, _)| name.len() == longest)
        .map(|(_, record)| record)
        .collect();

    match winners.as_slice() {
        [record] => TextMatch::Unique(*record, Confidence::Substring),
        several => TextMatch::Ambiguous(several.to_vec()),
    }
}

/// Plus proche centroïde en distance euclidienne (degrés), distance
/// rapportée en km sur le grand cercle
fn nearest_centroid<'a>(
    records: impl Iterator<Item = &'a MunicipalityRecord>,
    located: LocatedCoordinate,
) -> Option<(&'a MunicipalityRecord, f64)> {
    let point = located.coordinates.to_point();

    let nearest = records.min_by(|a, b| {
        let da = point.euclidean_distance(&a.centroid.to_point());
        let db = point.euclidean_distance(&b.centroid.to_point());
        da.total_cmp(&db)
    })?;

    let distance_km = point.haversine_distance(&nearest.centroid.to_point()) / 1000.0;
    Some((nearest, distance_km))
}

fn sorted_names(records: &[&MunicipalityRecord]) -> Vec<String> {
    let mut names: Vec<String> = records.iter().map(|r| r.name.clone()).collect();
    names.sort();
    names
}
