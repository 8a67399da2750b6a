//! Types de données pour le crate alberta-legal

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Description d'une propriété telle que saisie par l'utilisateur
///
/// Immuable, créée par requête.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    /// Adresse civique ou rurale (texte libre)
    #[serde(default)]
    pub address: String,

    /// Description légale (texte libre)
    #[serde(default)]
    pub legal_description: String,

    /// Informations complémentaires (texte libre)
    #[serde(default)]
    pub additional_info: String,

    /// Latitude fournie par l'appelant (optionnelle)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    /// Longitude fournie par l'appelant (optionnelle)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl PropertyDescriptor {
    pub fn new(
        address: impl Into<String>,
        legal_description: impl Into<String>,
        additional_info: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            legal_description: legal_description.into(),
            additional_info: additional_info.into(),
            latitude: None,
            longitude: None,
        }
    }

    /// Ajoute une coordonnée fournie
    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Coordonnée fournie, seulement si latitude et longitude sont présentes
    pub fn supplied_coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) if latitude.is_finite() && longitude.is_finite() => {
                Some(Coordinates::new(latitude, longitude))
            }
            _ => None,
        }
    }

    /// Vrai si aucun champ texte n'est renseigné et aucune coordonnée fournie
    pub fn is_blank(&self) -> bool {
        self.address.trim().is_empty()
            && self.legal_description.trim().is_empty()
            && self.additional_info.trim().is_empty()
            && self.supplied_coordinates().is_none()
    }
}

/// Coordonnée géographique en degrés décimaux (WGS84)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Point `geo` (x = longitude, y = latitude)
    pub fn to_point(self) -> geo::Point<f64> {
        geo::Point::new(self.longitude, self.latitude)
    }
}

/// Origine de la coordonnée utilisée pour la résolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSource {
    /// Fournie explicitement dans la requête
    Supplied,
    /// Paire décimale trouvée dans le texte
    Text,
    /// Approximée depuis la grille ATS
    LegalDescription,
}

/// Coordonnée avec son origine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocatedCoordinate {
    pub coordinates: Coordinates,
    pub source: CoordinateSource,
}

// ---------------------------------------------------------------------------
// Description légale
// ---------------------------------------------------------------------------

/// Quart (ou demie) de section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Quarter {
    Ne,
    Nw,
    Se,
    Sw,
    N,
    S,
    E,
    W,
}

impl Quarter {
    pub fn as_str(self) -> &'static str {
        match self {
            Quarter::Ne => "NE",
            Quarter::Nw => "NW",
            Quarter::Se => "SE",
            Quarter::Sw => "SW",
            Quarter::N => "N",
            Quarter::S => "S",
            Quarter::E => "E",
            Quarter::W => "W",
        }
    }

    /// Décalage (nord, ouest) du centre du quart, en fractions de section
    pub(crate) fn offset(self) -> (f64, f64) {
        match self {
            Quarter::Ne => (0.25, -0.25),
            Quarter::Nw => (0.25, 0.25),
            Quarter::Se => (-0.25, -0.25),
            Quarter::Sw => (-0.25, 0.25),
            Quarter::N => (0.25, 0.0),
            Quarter::S => (-0.25, 0.0),
            Quarter::E => (0.0, -0.25),
            Quarter::W => (0.0, 0.25),
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quarter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect::<String>()
            .to_uppercase();
        match compact.as_str() {
            "NE" | "NORTHEAST" => Ok(Quarter::Ne),
            "NW" | "NORTHWEST" => Ok(Quarter::Nw),
            "SE" | "SOUTHEAST" => Ok(Quarter::Se),
            "SW" | "SOUTHWEST" => Ok(Quarter::Sw),
            "N" | "NORTH" => Ok(Quarter::N),
            "S" | "SOUTH" => Ok(Quarter::S),
            "E" | "EAST" => Ok(Quarter::E),
            "W" | "WEST" => Ok(Quarter::W),
            _ => Err(format!("Invalid quarter: {}", s)),
        }
    }
}

/// Direction du méridien
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeridianDirection {
    West,
    East,
}

impl MeridianDirection {
    pub fn as_char(self) -> char {
        match self {
            MeridianDirection::West => 'W',
            MeridianDirection::East => 'E',
        }
    }
}

/// Méridien de référence (ex: W4M)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Meridian {
    pub direction: MeridianDirection,
    pub number: u8,
}

impl Meridian {
    pub fn west(number: u8) -> Self {
        Self {
            direction: MeridianDirection::West,
            number,
        }
    }
}

impl fmt::Display for Meridian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}M", self.direction.as_char(), self.number)
    }
}

impl FromStr for Meridian {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        let body = upper.strip_suffix('M').unwrap_or(&upper);
        let mut chars = body.chars();
        let direction = match chars.next() {
            Some('W') => MeridianDirection::West,
            Some('E') => MeridianDirection::East,
            _ => return Err(format!("Invalid meridian: {}", s)),
        };
        let number = chars
            .as_str()
            .trim()
            .parse::<u8>()
            .map_err(|_| format!("Invalid meridian: {}", s))?;
        Ok(Self { direction, number })
    }
}

impl From<Meridian> for String {
    fn from(meridian: Meridian) -> Self {
        meridian.to_string()
    }
}

impl TryFrom<String> for Meridian {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Description ATS (Alberta Township System)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TownshipDescription {
    /// Quart de section (absent pour une section entière)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quarter: Option<Quarter>,
    pub section: u8,
    pub township: u16,
    pub range: u16,
    pub meridian: Meridian,
}

impl fmt::Display for TownshipDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(quarter) = self.quarter {
            write!(f, "{} ", quarter)?;
        }
        write!(
            f,
            "{}-{}-{}-{}",
            self.section, self.township, self.range, self.meridian
        )
    }
}

/// Lot/Block/Plan (lotissement enregistré)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotBlockPlan {
    pub lot: String,
    pub block: String,
    pub plan: String,
}

/// Parcel/Plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParcelPlan {
    pub parcel: String,
    pub plan: String,
}

/// Forme de description légale reconnue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LegalDescription {
    /// Quart de section ATS (NE 12-45-26-W4M)
    QuarterSection(TownshipDescription),
    /// Section ATS entière
    Section(TownshipDescription),
    LotBlockPlan(LotBlockPlan),
    ParcelPlan(ParcelPlan),
}

impl LegalDescription {
    /// Partie ATS si la description en contient une
    pub fn township(&self) -> Option<&TownshipDescription> {
        match self {
            LegalDescription::QuarterSection(t) | LegalDescription::Section(t) => Some(t),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            LegalDescription::QuarterSection(_) => "quarter_section",
            LegalDescription::Section(_) => "section",
            LegalDescription::LotBlockPlan(_) => "lot_block_plan",
            LegalDescription::ParcelPlan(_) => "parcel_plan",
        }
    }
}

impl fmt::Display for LegalDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegalDescription::QuarterSection(t) | LegalDescription::Section(t) => t.fmt(f),
            LegalDescription::LotBlockPlan(l) => {
                write!(f, "Lot {}, Block {}, Plan {}", l.lot, l.block, l.plan)
            }
            LegalDescription::ParcelPlan(p) => write!(f, "Parcel {}, Plan {}", p.parcel, p.plan),
        }
    }
}

/// Valeur numérique hors des bornes de la grille ATS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundsWarning {
    pub field: String,
    pub value: u32,
    pub min: u32,
    pub max: u32,
}

impl fmt::Display for BoundsWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} outside {}..={}",
            self.field, self.value, self.min, self.max
        )
    }
}

/// Champs extraits d'une description légale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalDescriptionFields {
    pub description: LegalDescription,

    /// Texte exact reconnu par le matcher
    pub matched_text: String,

    /// Valeurs hors bornes (la correspondance est conservée)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<BoundsWarning>,
}

// ---------------------------------------------------------------------------
// Adresse et détails
// ---------------------------------------------------------------------------

/// Type d'adresse reconnu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressKind {
    Street,
    Rural,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreetAddress {
    pub number: String,
    pub street: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuralAddress {
    pub road_type: String,
    pub road_number: String,
}

/// Adresse analysée
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAddress {
    pub kind: AddressKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<StreetAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rural: Option<RuralAddress>,
    /// Code postal normalisé (majuscules, sans espace)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub full_address: String,
}

/// Caractéristiques extraites des informations complémentaires
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acreage: Option<f64>,
    #[serde(default)]
    pub zoning_hints: Vec<String>,
    #[serde(default)]
    pub development_intentions: Vec<String>,
    #[serde(default)]
    pub infrastructure_mentions: Vec<String>,
}

impl PropertyDetails {
    pub fn is_empty(&self) -> bool {
        self.acreage.is_none()
            && self.zoning_hints.is_empty()
            && self.development_intentions.is_empty()
            && self.infrastructure_mentions.is_empty()
    }

    pub fn has_zoning_hint(&self, hint: &str) -> bool {
        self.zoning_hints.iter().any(|h| h == hint)
    }
}

// ---------------------------------------------------------------------------
// Municipalités
// ---------------------------------------------------------------------------

/// Type de municipalité
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MunicipalityKind {
    City,
    Town,
    County,
}

impl fmt::Display for MunicipalityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MunicipalityKind::City => "city",
            MunicipalityKind::Town => "town",
            MunicipalityKind::County => "county",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: String,
    pub address: String,
}

/// Juridiction statique du registre
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MunicipalityRecord {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: MunicipalityKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<u32>,

    /// Centroïde approximatif
    pub centroid: Coordinates,

    pub website: String,

    /// Courriel du service d'urbanisme
    pub planning_email: String,

    /// Lien vers le règlement d'utilisation du sol (Land Use Bylaw)
    pub land_use_bylaw: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoning_map: Option<String>,

    pub contact: ContactInfo,
}

impl MunicipalityRecord {
    pub fn is_county(&self) -> bool {
        self.kind == MunicipalityKind::County
    }
}

// ---------------------------------------------------------------------------
// Résolution
// ---------------------------------------------------------------------------

/// Niveau de confiance d'une résolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Le texte est exactement le nom d'une municipalité
    Exact,
    /// Le nom apparaît dans le texte (le plus long l'emporte)
    Substring,
    /// Centroïde le plus proche d'une coordonnée
    NearestCentroid,
}

/// Raison d'une résolution impossible
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnresolvedReason {
    /// Aucun nom reconnu et aucune coordonnée
    NoMatch,
    /// Plusieurs noms de même longueur, sans coordonnée pour départager
    Ambiguous { candidates: Vec<String> },
    /// Centroïde le plus proche au-delà du rayon accepté
    TooFar { nearest: String, distance_km: f64 },
}

/// Résultat de la résolution: exactement une municipalité, ou aucune
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    Resolved {
        municipality: MunicipalityRecord,
        confidence: Confidence,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        distance_km: Option<f64>,
    },
    Unresolved { reason: UnresolvedReason },
}

impl Resolution {
    pub fn municipality(&self) -> Option<&MunicipalityRecord> {
        match self {
            Resolution::Resolved { municipality, .. } => Some(municipality),
            Resolution::Unresolved { .. } => None,
        }
    }

    pub fn confidence(&self) -> Option<Confidence> {
        match self {
            Resolution::Resolved { confidence, .. } => Some(*confidence),
            Resolution::Unresolved { .. } => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved { .. })
    }
}

/// Issue rapportée (pas une erreur: le rapport partiel reste possible)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportedIssue {
    UnresolvedMunicipality,
    NoLegalDescriptionMatch,
}

impl fmt::Display for ReportedIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReportedIssue::UnresolvedMunicipality => "Municipality could not be resolved",
            ReportedIssue::NoLegalDescriptionMatch => "No recognised legal description",
        })
    }
}

/// Résultat complet d'une analyse (sortie de l'assembleur)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionResult {
    /// Saisie d'origine
    pub descriptor: PropertyDescriptor,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal: Option<LegalDescriptionFields>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<ParsedAddress>,

    #[serde(default)]
    pub details: PropertyDetails,

    /// Noms du registre trouvés dans le texte (du plus long au plus court)
    #[serde(default)]
    pub municipality_hints: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<LocatedCoordinate>,

    pub resolution: Resolution,

    #[serde(default)]
    pub issues: Vec<ReportedIssue>,
}

impl ResolutionResult {
    pub fn municipality(&self) -> Option<&MunicipalityRecord> {
        self.resolution.municipality()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meridian_roundtrip_display() {
        let meridian: Meridian = "w4m".parse().unwrap();
        assert_eq!(meridian, Meridian::west(4));
        assert_eq!(meridian.to_string(), "W4M");

        let without_suffix: Meridian = "W5".parse().unwrap();
        assert_eq!(without_suffix.number, 5);
    }

    #[test]
    fn test_meridian_invalid() {
        assert!("X4".parse::<Meridian>().is_err());
        assert!("W".parse::<Meridian>().is_err());
    }

    #[test]
    fn test_quarter_from_str() {
        assert_eq!("ne".parse::<Quarter>().unwrap(), Quarter::Ne);
        assert_eq!("North East".parse::<Quarter>().unwrap(), Quarter::Ne);
        assert_eq!("S".parse::<Quarter>().unwrap(), Quarter::S);
        assert!("NX".parse::<Quarter>().is_err());
    }

    #[test]
    fn test_township_serializes_flat_fields() {
        let township = TownshipDescription {
            quarter: Some(Quarter::Ne),
            section: 12,
            township: 45,
            range: 26,
            meridian: Meridian::west(4),
        };
        let json = serde_json::to_value(LegalDescription::QuarterSection(township)).unwrap();
        assert_eq!(json["kind"], "quarter_section");
        assert_eq!(json["quarter"], "NE");
        assert_eq!(json["meridian"], "W4M");
        assert_eq!(json["range"], 26);
    }

    #[test]
    fn test_descriptor_blank() {
        assert!(PropertyDescriptor::new("  ", "", "\n").is_blank());
        assert!(!PropertyDescriptor::new("", "", "").with_coordinates(52.0, -113.0).is_blank());
        assert!(!PropertyDescriptor::new("Lacombe", "", "").is_blank());
    }

    #[test]
    fn test_supplied_coordinates_require_both() {
        let mut descriptor = PropertyDescriptor::new("", "", "");
        descriptor.latitude = Some(52.0);
        assert!(descriptor.supplied_coordinates().is_none());
    }

    #[test]
    fn test_unresolved_serialization() {
        let resolution = Resolution::Unresolved {
            reason: UnresolvedReason::NoMatch,
        };
        let json = serde_json::to_value(&resolution).unwrap();
        assert_eq!(json["status"], "unresolved");
        assert_eq!(json["reason"]["kind"], "no_match");
    }
}
