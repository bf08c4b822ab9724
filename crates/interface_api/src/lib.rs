//! HTTP API Layer
//!
//! This crate provides the REST API for the expense system using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for claims and receipt extraction
//! - **Middleware**: Authentication, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! All I/O behind the handlers goes through the domain port traits held in
//! [`AppState`], so the same router runs against PostgreSQL in production
//! and against in-memory stores in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_claims::ClaimStore;
use domain_identity::RoleDirectory;
use domain_receipt::FieldExtractor;

use crate::config::ApiConfig;
use crate::handlers::{claims, health, receipts};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub claims: Arc<dyn ClaimStore>,
    pub roles: Arc<dyn RoleDirectory>,
    pub extractor: Arc<FieldExtractor>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Shared application state with the port adapters
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new().route("/health", get(health::health_check));

    // Claims routes
    let claims_routes = Router::new()
        .route("/", post(claims::submit_claim))
        .route("/", get(claims::list_my_claims))
        .route("/review", get(claims::list_all_claims))
        .route("/summary", get(claims::claim_summary))
        .route("/:id/status", put(claims::update_status));

    // Receipt routes
    let receipt_routes = Router::new().route("/extract", post(receipts::extract_fields));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/claims", claims_routes)
        .nest("/receipts", receipt_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
