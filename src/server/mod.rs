//! HTTP surface
//!
//! ## Endpoints
//!
//! - `GET /` - Liveness check
//! - `POST /generate-photoshoot` - Generate photoshoot images

pub mod handlers;

use crate::app::PhotoshootService;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

pub use handlers::ApiError;

/// Application state shared across handlers
pub struct AppState {
    pub service: PhotoshootService,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl AppState {
    pub fn new(service: PhotoshootService, cors_allowed_origins: Vec<String>) -> Self {
        Self {
            service,
            cors_allowed_origins,
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_allowed_origins);
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(handlers::root_handler))
        .route(
            "/generate-photoshoot",
            post(handlers::generate_photoshoot_handler),
        )
        .with_state(shared_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// An empty list allows any origin. Configured origins that fail to parse are
/// dropped; if none survive, no cross-origin request is allowed.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        warn!("No valid CORS origins configured; cross-origin requests will be refused");
        cors
    } else {
        cors.allow_origin(origins)
    }
}
