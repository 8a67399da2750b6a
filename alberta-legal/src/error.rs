//! Types d'erreurs pour le crate alberta-legal
//!
//! Les issues "municipalité non résolue" et "aucune description légale"
//! ne sont pas des erreurs: elles sont portées par [`crate::ResolutionResult`].

use thiserror::Error;

/// Erreurs pouvant survenir lors du chargement du registre des municipalités
#[derive(Debug, Error)]
pub enum LegalError {
    /// Erreur d'I/O lors de la lecture du registre
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON du registre invalide
    #[error("Invalid registry JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Registre vide
    #[error("Municipality registry is empty")]
    EmptyRegistry,

    /// Deux enregistrements portent le même nom (après normalisation)
    #[error("Duplicate municipality name: {0}")]
    DuplicateName(String),

    /// Enregistrement invalide
    #[error("Invalid municipality record {name}: {reason}")]
    InvalidRecord { name: String, reason: String },
}

impl LegalError {
    /// Crée une erreur d'enregistrement invalide avec contexte
    pub fn invalid_record(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
