//! # itp-api: Interaction Ticket Provider Service
//!
//! Accepts interaction claims from DSNP clients and, when a claim is
//! entitled and its order is corroborated by the order-status authority,
//! answers with an Ed25519-signed interaction ticket.
//!
//! ## API Surface
//!
//! | Path | Module |
//! |------|--------|
//! | `/v1/interactions` | [`routes::interactions`] |
//! | `/v1/interactions/attribute-set-types` | [`routes::interactions`] |
//! | `/health/liveness`, `/health/readiness` | probes |
//! | `/metrics` | Prometheus exposition, when a recorder is installed |

pub mod config;
pub mod error;
pub mod extractors;
pub mod metrics;
pub mod orchestrator;
pub mod routes;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

/// Request body limit for the API routes: 1 MiB.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::interactions::router())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let mut probes = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));
    if state.prometheus.is_some() {
        probes = probes.route("/metrics", get(prometheus_metrics));
    }

    Router::new().merge(probes.with_state(state)).merge(api)
}

/// GET /health/liveness: the process is up.
async fn liveness() -> &'static str {
    "ok"
}

/// GET /health/readiness: at least one entitlement rule is registered.
///
/// The signer needs no check: an [`AppState`] cannot be built without one.
async fn readiness(State(state): State<AppState>) -> Result<&'static str, AppError> {
    if state.orchestrator.registry().is_empty() {
        return Err(AppError::ServiceUnavailable(
            "no entitlement rules registered".into(),
        ));
    }
    Ok("ready")
}

/// GET /metrics
async fn prometheus_metrics(State(state): State<AppState>) -> Response {
    match &state.prometheus {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
