//! Conversion failures

use patchbay_core::GraphError;
use patchbay_oracle::OracleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// The graph itself is unusable (no sink, dangling edge reference).
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The oracle rejected the tree or could not be reached.
    #[error(transparent)]
    Oracle(#[from] OracleError),

    /// Recursive descent met a node it is still in the middle of expanding.
    #[error("pipeline contains a cycle through node `{0}`")]
    CycleDetected(String),

    /// A stored tree no serialize walk could have produced.
    #[error("malformed tree: {0}")]
    MalformedTree(String),

    #[error("tree is not representable as JSON: {0}")]
    Json(#[from] serde_json::Error),
}
