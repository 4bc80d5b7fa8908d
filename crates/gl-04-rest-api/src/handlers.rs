//! Request handlers.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use gl_03_gateway_client::GarmentInput;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{error, info};

use crate::router::AppState;

pub const CREATED_MESSAGE: &str = "Garment created successfully";
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create garment";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch garments";

/// Body of `POST /api/garments`. Numbers are accepted and sent as text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGarmentRequest {
    #[serde(deserialize_with = "text_or_number")]
    pub garment_id: String,
    #[serde(deserialize_with = "text_or_number")]
    pub color: String,
    #[serde(deserialize_with = "text_or_number")]
    pub size: String,
    #[serde(deserialize_with = "text_or_number")]
    pub owner: String,
    #[serde(deserialize_with = "text_or_number")]
    pub appraised_value: String,
}

impl From<CreateGarmentRequest> for GarmentInput {
    fn from(request: CreateGarmentRequest) -> Self {
        GarmentInput {
            id: request.garment_id,
            color: request.color,
            size: request.size,
            owner: request.owner,
            appraised_value: request.appraised_value,
        }
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}

pub async fn create_garment(
    State(state): State<AppState>,
    Json(request): Json<CreateGarmentRequest>,
) -> Response {
    let garment_id = request.garment_id.clone();
    match state.ledger.create_garment(request.into()).await {
        Ok(()) => {
            info!(%garment_id, "garment created");
            (StatusCode::CREATED, CREATED_MESSAGE).into_response()
        }
        Err(e) => {
            error!(%garment_id, error = %e, "error creating garment");
            (StatusCode::INTERNAL_SERVER_ERROR, CREATE_FAILED_MESSAGE).into_response()
        }
    }
}

pub async fn list_garments(State(state): State<AppState>) -> Response {
    let raw = match state.ledger.list_garments().await {
        Ok(raw) => raw,
        Err(e) => {
            error!(error = %e, "error fetching garments");
            return (StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED_MESSAGE).into_response();
        }
    };
    if let Err(e) = serde_json::from_str::<Value>(&raw) {
        error!(error = %e, "ledger returned malformed garment list");
        return (StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED_MESSAGE).into_response();
    }
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        raw,
    )
        .into_response()
}

pub async fn health() -> &'static str {
    "OK"
}

pub async fn metrics() -> Response {
    match ledger_telemetry::encode_metrics() {
        Ok(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
