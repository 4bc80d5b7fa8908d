use axum::http::{HeaderName, Method};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::ports::GarmentLedger;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<dyn GarmentLedger>,
}

/// Any origin; the methods and headers browser clients of the service send.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            HeaderName::from_static("origin"),
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
        ])
}

pub fn build_router(ledger: Arc<dyn GarmentLedger>) -> Router {
    Router::new()
        .route(
            "/api/garments",
            get(handlers::list_garments).post(handlers::create_garment),
        )
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { ledger })
}
