//! Configuration du serveur et chargement du registre

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use alberta_legal::MunicipalityRegistry;

/// Configuration du serveur HTTP
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Répertoire de sortie des rapports
    pub reports_dir: PathBuf,
    /// Registre JSON remplaçant le preset embarqué
    pub municipalities: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
            reports_dir: PathBuf::from("reports"),
            municipalities: None,
        }
    }
}

impl ServerConfig {
    /// Charge la configuration depuis les variables d'environnement
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Charge la configuration depuis une source de variables
    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: get("LANDUSE_HOST")
                .filter(|h| !h.trim().is_empty())
                .unwrap_or(defaults.host),
            port: get("LANDUSE_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            reports_dir: get("LANDUSE_REPORTS_DIR")
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.reports_dir),
            municipalities: get("LANDUSE_MUNICIPALITIES")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Adresse d'écoute `host:port`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Registre configuré (fichier) ou preset embarqué
    pub fn load_registry(&self) -> Result<MunicipalityRegistry> {
        load_registry(self.municipalities.as_deref())
    }
}

/// Charge le registre depuis un fichier JSON, ou le preset embarqué
pub fn load_registry(path: Option<&Path>) -> Result<MunicipalityRegistry> {
    let registry = match path {
        Some(path) => MunicipalityRegistry::load(path)
            .context(format!("Failed to load municipality registry: {}", path.display()))?,
        None => MunicipalityRegistry::alberta().context("Failed to parse embedded registry")?,
    };

    tracing::info!(
        municipalities = registry.len(),
        source = %path.map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".into()),
        "Municipality registry ready"
    );
    Ok(registry)
}
