//! The injected validation capability and its failure modes

use serde_json::Value;
use thiserror::Error;

/// Why an oracle call did not succeed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OracleError {
    /// The oracle understood the tree and said no. The message is the
    /// oracle's own and is shown to the end user verbatim.
    #[error("pipeline rejected: {0}")]
    Rejected(String),

    /// The oracle could not be reached or gave an unusable reply.
    #[error("oracle unavailable: {0}")]
    Unavailable(String),
}

/// An external judge that accepts or rejects a candidate filter tree.
///
/// Implementations own whatever process or connection they need; the
/// lifecycle is explicit so nothing hides behind a global. `init` is
/// idempotent — providers that lazily start a backing resource must guard
/// against double initialization themselves. There are no retries at this
/// seam: every failure is terminal for the call that triggered it.
#[async_trait::async_trait]
pub trait Validator: Send + Sync {
    /// One-time startup of the backing resource. Callers may skip this;
    /// `validate` must bring the resource up on first use regardless.
    async fn init(&self) -> Result<(), OracleError> {
        Ok(())
    }

    /// Accept or reject a tree already converted to plain JSON.
    async fn validate(&self, tree: &Value) -> Result<(), OracleError>;

    /// Release any held process or connection.
    async fn shutdown(&self) -> Result<(), OracleError> {
        Ok(())
    }

    /// Provider name for logs.
    fn name(&self) -> &str;
}
