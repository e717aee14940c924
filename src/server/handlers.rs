//! API request handlers

use super::AppState;
use crate::models::{PhotoshootRequest, PhotoshootResult};
use crate::Error;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info_span, warn, Instrument};
use uuid::Uuid;

pub const MISSING_PARAMETERS: &str = "Missing required photoshoot parameters";
pub const GENERATION_FAILED: &str = "Failed to generate photoshoot images";
pub const INVALID_BODY: &str = "Invalid request body";

/// JSON error body returned to the caller.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

/// API Error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            details: self.details,
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        if err.is_client_error() {
            ApiError {
                status: StatusCode::BAD_REQUEST,
                message: MISSING_PARAMETERS.to_string(),
                details: None,
            }
        } else {
            ApiError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: GENERATION_FAILED.to_string(),
                details: Some(err.to_string()),
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            message: INVALID_BODY.to_string(),
            details: Some(rejection.body_text()),
        }
    }
}

/// Liveness check
pub async fn root_handler() -> &'static str {
    "Server is running"
}

/// Generate photoshoot images for the posted request
pub async fn generate_photoshoot_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PhotoshootRequest>, JsonRejection>,
) -> Result<Json<PhotoshootResult>, ApiError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("generate_photoshoot", %request_id);

    let Json(request) = payload.map_err(|rejection| {
        warn!(parent: &span, "Rejected photoshoot request body: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;

    match state.service.generate(&request).instrument(span.clone()).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            let _guard = span.enter();
            if e.is_client_error() {
                warn!("Invalid photoshoot request: {}", e);
            } else {
                error!("Photoshoot Generation Error: {}", e);
            }
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_maps_to_bad_request() {
        let api_error = ApiError::from(Error::Validation(vec!["location"]));
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.message, MISSING_PARAMETERS);
        assert!(api_error.details.is_none());
    }

    #[test]
    fn test_upstream_error_maps_to_internal_error() {
        let api_error = ApiError::from(Error::AiProvider("429 Rate limit reached".to_string()));
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.message, GENERATION_FAILED);
        assert!(api_error.details.unwrap().contains("429 Rate limit reached"));
    }

    #[tokio::test]
    async fn test_root_handler() {
        assert_eq!(root_handler().await, "Server is running");
    }
}
