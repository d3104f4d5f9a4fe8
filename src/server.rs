//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    http::header::ACCESS_CONTROL_ALLOW_ORIGIN,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::{CooldownStore, HmacTokenVerifier, InMemoryCooldownStore, TokenVerifier};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub verifier: Arc<dyn TokenVerifier>,
    pub store: Arc<dyn CooldownStore>,
}

/// Create application state with the built-in verifier and store.
///
/// All process-wide state is built here exactly once and handed down;
/// handlers never read globals.
pub fn create_app_state(config: Arc<AppConfig>) -> AppState {
    let verifier: Arc<dyn TokenVerifier> = match config.token_secret.as_deref() {
        Some(secret) => Arc::new(HmacTokenVerifier::new(secret)),
        None => {
            tracing::warn!(
                "No token secret configured; using a random secret \
                 (tokens will not survive a restart)"
            );
            Arc::new(HmacTokenVerifier::with_random_secret())
        }
    };
    let store: Arc<dyn CooldownStore> = Arc::new(InMemoryCooldownStore::new());

    create_app_state_with(config, verifier, store)
}

/// Create application state from explicit collaborators (used by tests to
/// inject alternative stores and verifiers).
pub fn create_app_state_with(
    config: Arc<AppConfig>,
    verifier: Arc<dyn TokenVerifier>,
    store: Arc<dyn CooldownStore>,
) -> AppState {
    AppState {
        config,
        verifier,
        store,
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests. Every
/// response carries a permissive CORS origin header; preflights are
/// answered by a dedicated OPTIONS handler.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/generate",
            post(handle_generate).options(api::handle_preflight),
        )
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            axum::http::HeaderValue::from_static("*"),
        ))
}

// Wrapper handler to extract state components for the underlying API handler

async fn handle_generate(
    axum::extract::State(state): axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    body: String,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    api::handle_generate(
        axum::extract::State(state.config),
        axum::extract::State(state.verifier),
        axum::extract::State(state.store),
        headers,
        body,
    )
    .await
}
