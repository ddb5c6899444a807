//! # swasthya_api
//!
//! HTTP API library for the Swasthya Portal.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use swasthya_core::auth::service::AuthService;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{auth, health};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Auth service; sole owner of the credential store.
    pub auth: Arc<AuthService>,
    /// API configuration.
    pub config: ApiConfig,
}

/// Builds the Axum router with all routes and shared state.
///
/// Method routing gives non-POST requests to `/login` and `/register` a 405
/// with an `Allow` header for free.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/login", post(auth::login_handler))
        .route("/register", post(auth::register_handler))
        .route("/health", get(health::health_handler))
        .layer(cors)
        .with_state(state)
}
