//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the movie store handed to handlers
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: query/response shapes
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use crate::config::ApiConfig;
use crate::cors::CorsPolicy;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
///
/// Each call gets its own `services`, so tests can run against fresh stores.
pub fn build_app(config: &ApiConfig, services: services::AppServices) -> Router {
    let cors = CorsPolicy::new(config.allowed_origins.iter().cloned());

    routes::router(cors).layer(ServiceBuilder::new().layer(Extension(Arc::new(services))))
}
