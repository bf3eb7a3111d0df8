//! Validator provider implementations

pub mod accept;
pub mod http;
pub mod process;

use anyhow::Result;
use serde::Deserialize;

use crate::validator::Validator;

/// The reply shape shared by the HTTP and subprocess oracles.
#[derive(Debug, Deserialize)]
pub(crate) struct Verdict {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl Verdict {
    pub fn rejection_message(self) -> String {
        self.error
            .unwrap_or_else(|| "rejected without a message".to_string())
    }
}

/// Factory function to create validators by provider name.
pub fn create_validator(
    provider_name: &str,
    url: Option<String>,
    command: Option<String>,
) -> Result<Box<dyn Validator>> {
    match provider_name {
        "accept" => Ok(Box::new(accept::AcceptAllValidator::new())),
        "http" => {
            let url = url.ok_or_else(|| anyhow::anyhow!("http oracle requires --oracle-url"))?;
            Ok(Box::new(http::HttpValidator::new(url)))
        }
        "process" => {
            let command =
                command.ok_or_else(|| anyhow::anyhow!("process oracle requires --oracle-cmd"))?;
            Ok(Box::new(process::ProcessValidator::from_command_line(
                &command,
            )))
        }
        _ => anyhow::bail!("Unknown oracle provider: {}", provider_name),
    }
}
