//! REST API handlers for the Patchbay server

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use patchbay_core::{GraphDocument, PipelineGraph};
use patchbay_ir::{to_oracle_value, ConvertError, TreeNode};
use patchbay_oracle::OracleError;
use serde::Serialize;
use tracing::warn;

use crate::ServerState;

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body of a `/api/validate` reply; mirrors the oracle verdict shape.
#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub ok: bool,
    pub error: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub oracle: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(err: ConvertError) -> ApiError {
    warn!("Conversion failed: {}", err);
    let status = match &err {
        ConvertError::Oracle(OracleError::Unavailable(_)) => StatusCode::BAD_GATEWAY,
        ConvertError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

/// Convert an editor graph into the canonical tree.
pub async fn export_tree(
    State(state): State<Arc<ServerState>>,
    Json(doc): Json<GraphDocument>,
) -> Result<Json<TreeNode>, ApiError> {
    let graph = PipelineGraph::from_parts(doc.nodes, doc.edges)
        .map_err(|e| error_response(ConvertError::Graph(e)))?;
    let tree = patchbay_ir::serialize(&graph, state.validator.as_ref())
        .await
        .map_err(error_response)?;
    Ok(Json(tree))
}

/// Expand a stored tree back into a positioned editor graph.
pub async fn import_tree(
    State(state): State<Arc<ServerState>>,
    Json(tree): Json<TreeNode>,
) -> Result<Json<GraphDocument>, ApiError> {
    let doc = patchbay_ir::deserialize(&tree, state.validator.as_ref())
        .await
        .map_err(error_response)?;
    Ok(Json(doc))
}

/// Run a tree past the oracle without expanding it.
pub async fn validate_tree(
    State(state): State<Arc<ServerState>>,
    Json(tree): Json<TreeNode>,
) -> Result<Json<ValidateResponse>, ApiError> {
    let value = to_oracle_value(&tree).map_err(error_response)?;
    match state.validator.validate(&value).await {
        Ok(()) => Ok(Json(ValidateResponse {
            ok: true,
            error: None,
        })),
        Err(OracleError::Rejected(msg)) => Ok(Json(ValidateResponse {
            ok: false,
            error: Some(msg),
        })),
        Err(e) => Err(error_response(ConvertError::Oracle(e))),
    }
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<ServerState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        oracle: state.validator.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchbay_core::{Edge, Handle, Node, NodeKind, Position};
    use patchbay_oracle::providers::accept::AcceptAllValidator;
    use patchbay_oracle::Validator;
    use serde_json::Value;

    struct RefusingOracle;

    #[async_trait::async_trait]
    impl Validator for RefusingOracle {
        async fn validate(&self, _tree: &Value) -> Result<(), OracleError> {
            Err(OracleError::Rejected("bad pipeline".to_string()))
        }
        fn name(&self) -> &str {
            "refusing"
        }
    }

    fn two_node_doc() -> GraphDocument {
        let source = Node {
            id: "in".to_string(),
            kind: NodeKind::Source,
            name: "input".to_string(),
            stream_type: "av".to_string(),
            parameters: Default::default(),
            input_handles: Vec::new(),
            output_handles: vec![Handle::new("output-0", "av")],
            filename: Some("clip.mp4".to_string()),
            input_typings: None,
            output_typings: None,
            position: Position::default(),
        };
        let sink = Node {
            id: "out".to_string(),
            kind: NodeKind::Sink,
            name: "output".to_string(),
            stream_type: "av".to_string(),
            parameters: Default::default(),
            input_handles: vec![Handle::new("input-0", "av")],
            output_handles: Vec::new(),
            filename: None,
            input_typings: None,
            output_typings: None,
            position: Position::default(),
        };
        GraphDocument {
            nodes: vec![source, sink],
            edges: vec![Edge {
                id: "e1".to_string(),
                source: "in".to_string(),
                target: "out".to_string(),
                source_handle: "output-0".to_string(),
                target_handle: "input-0".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_export_then_import() {
        let state = Arc::new(ServerState::new(Box::new(AcceptAllValidator::new())));

        let Json(tree) = export_tree(State(Arc::clone(&state)), Json(two_node_doc()))
            .await
            .unwrap();
        assert_eq!(tree.tag, "OutputStream");

        let Json(doc) = import_tree(State(state), Json(tree)).await.unwrap();
        assert_eq!(doc.nodes.len(), 2);
        assert_eq!(doc.edges.len(), 1);
    }

    #[tokio::test]
    async fn test_export_rejection_is_unprocessable() {
        let state = Arc::new(ServerState::new(Box::new(RefusingOracle)));

        let (status, Json(body)) = export_tree(State(state), Json(two_node_doc()))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.error.contains("bad pipeline"));
    }

    #[tokio::test]
    async fn test_validate_reports_verdict() {
        let state = Arc::new(ServerState::new(Box::new(RefusingOracle)));
        let Json(tree) = export_tree(
            State(Arc::new(ServerState::new(Box::new(AcceptAllValidator::new())))),
            Json(two_node_doc()),
        )
        .await
        .unwrap();

        let Json(verdict) = validate_tree(State(state), Json(tree)).await.unwrap();
        assert!(!verdict.ok);
        assert_eq!(verdict.error.as_deref(), Some("bad pipeline"));
    }

    #[tokio::test]
    async fn test_health_check() {
        let state = Arc::new(ServerState::new(Box::new(AcceptAllValidator::new())));
        let Json(health) = health_check(State(state)).await;
        assert_eq!(health.status, "ok");
        assert_eq!(health.oracle, "accept-all");
    }
}
