//! # landuse-feasibility
//!
//! Étude de faisabilité préliminaire pour les propriétés albertaines.
//!
//! ## Features
//!
//! - Analyse des descriptions (via `alberta-legal`) et résolution de la municipalité
//! - Zonage probable, usages, marges de recul et exigences de développement
//! - Synthèse de faisabilité et analyse de projets de chalets
//! - Rapports JSON + texte
//! - API HTTP (axum) et CLI
//!
//! ## Usage CLI
//!
//! ```bash
//! # Serveur HTTP
//! landuse-feasibility serve --port 5000
//!
//! # Analyse ponctuelle
//! landuse-feasibility analyze --address "near Lacombe" --legal "NE 12-45-26-W4M" \
//!     --info "14.55 acre rural commercial property" --report
//!
//! # Municipalités supportées
//! landuse-feasibility municipalities --json
//! ```

pub mod analysis;
pub mod config;
pub mod feasibility;
pub mod policy;
pub mod report;
pub mod server;

pub use analysis::{analyze_property, PropertyAnalysis};
pub use config::ServerConfig;
pub use report::{FeasibilityReport, ReportFiles};
pub use server::{app, AppState};
