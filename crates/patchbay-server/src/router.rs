//! Axum router setup for the Patchbay API

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::{
    handlers::{export_tree, health_check, import_tree, validate_tree},
    ServerState,
};

/// Create the axum router with all routes
pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        // Graph -> tree (export) and tree -> graph (import)
        .route("/api/export", post(export_tree))
        .route("/api/import", post(import_tree))
        // Oracle pass-through
        .route("/api/validate", post(validate_tree))
        .route("/api/health", get(health_check))
        // The editor runs on a different origin during development
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchbay_oracle::providers::accept::AcceptAllValidator;

    #[test]
    fn test_router_creation() {
        let state = Arc::new(ServerState::new(Box::new(AcceptAllValidator::new())));
        let _router = create_router(state);
    }
}
