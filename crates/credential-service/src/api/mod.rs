//! API module for the credential services

pub mod error;
pub mod handlers;
pub mod state;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use credential_core::Envelope;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Health check payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthInfo {
    pub service: String,
    pub worker_id: String,
    pub version: String,
    pub timestamp: String,
}

/// Health check endpoint
///
/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Envelope<HealthInfo>> {
    Json(Envelope::success(HealthInfo {
        service: state.role.service_name().into(),
        worker_id: state.worker_id.clone(),
        version: env!("CARGO_PKG_VERSION").into(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}

/// Create the API router for the configured role
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration for the browser front-end
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new().route("/health", get(health));

    if state.role.serves_issuance() {
        router = router.route("/credentials/issue", post(handlers::issue_credential));
    }

    if state.role.serves_verification() {
        router = router
            .route("/credentials/verify", get(handlers::verify_without_id))
            .route("/credentials/verify/{id}", get(handlers::verify_credential));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
