//! Remote HTTP validator

use serde_json::Value;
use tracing::debug;

use super::Verdict;
use crate::validator::{OracleError, Validator};

/// Posts each candidate tree to a remote validation endpoint.
///
/// The endpoint receives the tree JSON as the request body and replies with
/// `{"ok": bool, "error": string?}`.
pub struct HttpValidator {
    client: reqwest::Client,
    url: String,
}

impl HttpValidator {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait::async_trait]
impl Validator for HttpValidator {
    async fn validate(&self, tree: &Value) -> Result<(), OracleError> {
        debug!("Posting tree to oracle at {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .json(tree)
            .send()
            .await
            .map_err(|e| OracleError::Unavailable(e.to_string()))?;

        let verdict: Verdict = response
            .error_for_status()
            .map_err(|e| OracleError::Unavailable(e.to_string()))?
            .json()
            .await
            .map_err(|e| OracleError::Unavailable(format!("unparsable oracle reply: {e}")))?;

        if verdict.ok {
            Ok(())
        } else {
            Err(OracleError::Rejected(verdict.rejection_message()))
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}
