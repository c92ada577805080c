//! # Interaction Routes
//!
//! | Method | Path | Outcome |
//! |--------|------|---------|
//! | POST | `/v1/interactions` | 200 `{attributeSetType, ticket}`, 404, 401, 422, 500 |
//! | GET | `/v1/interactions/attribute-set-types` | 200 `{attributeSetTypes: [...]}` |

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use itp_entitlement::InteractionClaim;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::orchestrator::InteractionResponse;
use crate::state::AppState;

/// Body of `GET /v1/interactions/attribute-set-types`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AttributeSetTypesResponse {
    #[serde(rename = "attributeSetTypes")]
    pub attribute_set_types: Vec<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/interactions", post(submit_interaction))
        .route(
            "/v1/interactions/attribute-set-types",
            get(list_attribute_set_types),
        )
}

/// POST /v1/interactions: issue a ticket for an interaction claim.
async fn submit_interaction(
    State(state): State<AppState>,
    body: Result<Json<InteractionClaim>, JsonRejection>,
) -> Result<Json<InteractionResponse>, AppError> {
    let claim = extract_json(body)?;
    let response = state.orchestrator.submit(claim).await?;
    Ok(Json(response))
}

/// GET /v1/interactions/attribute-set-types
async fn list_attribute_set_types(
    State(state): State<AppState>,
) -> Json<AttributeSetTypesResponse> {
    let attribute_set_types = state
        .orchestrator
        .registry()
        .registered_types()
        .into_iter()
        .map(|t| t.as_str().to_string())
        .collect();
    Json(AttributeSetTypesResponse {
        attribute_set_types,
    })
}
