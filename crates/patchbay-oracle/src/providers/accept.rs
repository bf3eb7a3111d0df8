//! Accept-all validator for offline use and tests

use serde_json::Value;
use tracing::debug;

use crate::validator::{OracleError, Validator};

/// Accepts every tree without looking at it. Lets the editor run with no
/// validation backend configured.
pub struct AcceptAllValidator;

impl AcceptAllValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AcceptAllValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Validator for AcceptAllValidator {
    async fn validate(&self, _tree: &Value) -> Result<(), OracleError> {
        debug!("accept-all oracle: tree accepted unseen");
        Ok(())
    }

    fn name(&self) -> &str {
        "accept-all"
    }
}
