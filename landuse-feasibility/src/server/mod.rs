//! API HTTP (axum)
//!
//! | Route                            | Méthode | Rôle                                |
//! |----------------------------------|---------|-------------------------------------|
//! | `/health`                        | GET     | Liveness                            |
//! | `/api/analyze_property`          | POST    | Analyse d'une propriété             |
//! | `/api/generate_report`           | POST    | Analyse + rapport écrit sur disque  |
//! | `/api/municipalities`            | GET     | Municipalités supportées            |
//! | `/api/municipalities/:name`      | GET     | Détails d'une municipalité          |

pub mod error;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use alberta_legal::{MunicipalityRecord, MunicipalityRegistry, PropertyDescriptor};

use crate::analysis::{analyze_property, PropertyAnalysis};
use crate::config::ServerConfig;
use crate::policy::MunicipalityDetails;
use crate::report::{FeasibilityReport, ReportFiles};

pub use error::AppError;

/// État partagé: registre en lecture seule et configuration
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<MunicipalityRegistry>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(registry: MunicipalityRegistry, config: ServerConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            config: Arc::new(config),
        }
    }
}

/// Routeur complet
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/analyze_property", post(analyze))
        .route("/api/generate_report", post(generate_report))
        .route("/api/municipalities", get(list_municipalities))
        .route("/api/municipalities/:name", get(municipality_details))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Lance le serveur jusqu'à Ctrl-C
pub async fn serve(state: AppState) -> Result<()> {
    let address = state.config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .context(format!("Failed to bind {}", address))?;

    tracing::info!(address = %address, "Listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

async fn health() -> &'static str {
    "ok"
}

/// Rejette les corps illisibles et les saisies vides avant l'analyse
fn validated_descriptor(
    body: Result<Json<PropertyDescriptor>, JsonRejection>,
) -> Result<PropertyDescriptor, AppError> {
    let Json(descriptor) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    if descriptor.is_blank() {
        return Err(AppError::Validation(
            "at least one of address, legal_description or additional_info is required".into(),
        ));
    }
    Ok(descriptor)
}

async fn analyze(
    State(state): State<AppState>,
    body: Result<Json<PropertyDescriptor>, JsonRejection>,
) -> Result<Json<PropertyAnalysis>, AppError> {
    let descriptor = validated_descriptor(body)?;
    Ok(Json(analyze_property(&descriptor, &state.registry)))
}

#[derive(Debug, Serialize)]
struct GeneratedReport {
    id: String,
    files: ReportFiles,
    analysis: PropertyAnalysis,
}

async fn generate_report(
    State(state): State<AppState>,
    body: Result<Json<PropertyDescriptor>, JsonRejection>,
) -> Result<Json<GeneratedReport>, AppError> {
    let descriptor = validated_descriptor(body)?;
    let report = FeasibilityReport::new(analyze_property(&descriptor, &state.registry));

    let dir: PathBuf = state.config.reports_dir.clone();
    let (report, files) = tokio::task::spawn_blocking(move || {
        let files = report.save(&dir)?;
        Ok::<_, anyhow::Error>((report, files))
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(Json(GeneratedReport {
        id: report.id,
        files,
        analysis: report.analysis,
    }))
}

async fn list_municipalities(State(state): State<AppState>) -> Json<Vec<MunicipalityRecord>> {
    Json(state.registry.sorted_by_name().into_iter().cloned().collect())
}

async fn municipality_details(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let record = state
        .registry
        .find_by_name(&name)
        .ok_or_else(|| AppError::NotFound(format!("municipality '{}' is not supported", name)))?;

    let details = serde_json::to_value(MunicipalityDetails::new(record))
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(details))
}
