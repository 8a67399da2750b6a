//! Exigences de développement

use alberta_legal::MunicipalityRecord;

use super::zoning::ZoningDistrict;

const BASE: &[&str] = &[
    "Development permit required",
    "Building permit required",
    "Compliance with Alberta Building Code",
];

const COMMERCIAL: &[&str] = &[
    "Site plan approval required",
    "Parking plan submission",
    "Landscaping plan required",
    "Signage approval needed",
];

const RURAL: &[&str] = &[
    "Septic system approval (if applicable)",
    "Water well testing (if applicable)",
    "Environmental assessment may be required",
    "Agricultural impact assessment",
];

const COUNTY: &[&str] = &[
    "County road access approval",
    "Fire protection plan",
    "Waste management plan",
];

/// Exigences cumulées: base, puis commercial, rural et comté selon le cas
pub fn development_requirements(record: &MunicipalityRecord, district: ZoningDistrict) -> Vec<String> {
    let mut requirements: Vec<&str> = BASE.to_vec();

    if district.is_commercial() {
        requirements.extend_from_slice(COMMERCIAL);
    }
    if district.is_rural() {
        requirements.extend_from_slice(RURAL);
    }
    if record.is_county() {
        requirements.extend_from_slice(COUNTY);
    }

    requirements.into_iter().map(String::from).collect()
}
