//! Subprocess interpreter validator
//!
//! Speaks newline-delimited JSON to an embedded interpreter (typically a
//! Python script wrapping the filter-graph engine): one tree per request
//! line out, one verdict line back. The child is spawned lazily on first
//! use and reused across calls; the mutex around the handle is what guards
//! against concurrent double-initialization.

use std::process::Stdio;

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::Verdict;
use crate::validator::{OracleError, Validator};

struct OracleProcess {
    child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
}

pub struct ProcessValidator {
    command: String,
    args: Vec<String>,
    handle: Mutex<Option<OracleProcess>>,
}

impl ProcessValidator {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            handle: Mutex::new(None),
        }
    }

    /// Split a shell-ish command line (`python3 oracle.py`) on whitespace.
    pub fn from_command_line(command_line: &str) -> Self {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let command = parts.next().unwrap_or_default();
        Self::new(command, parts.collect())
    }

    fn spawn(&self) -> Result<OracleProcess, OracleError> {
        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| {
                OracleError::Unavailable(format!("failed to spawn `{}`: {e}", self.command))
            })?;

        let stdin = child.stdin.take().ok_or_else(|| {
            OracleError::Unavailable("oracle process has no stdin pipe".to_string())
        })?;
        let stdout = child.stdout.take().ok_or_else(|| {
            OracleError::Unavailable("oracle process has no stdout pipe".to_string())
        })?;

        info!("Started oracle process `{}`", self.command);

        Ok(OracleProcess {
            child,
            stdin,
            stdout: BufReader::new(stdout).lines(),
        })
    }

    async fn roundtrip(proc: &mut OracleProcess, tree: &Value) -> Result<Verdict, OracleError> {
        let mut request = serde_json::to_string(tree)
            .map_err(|e| OracleError::Unavailable(format!("unserializable tree: {e}")))?;
        request.push('\n');

        proc.stdin
            .write_all(request.as_bytes())
            .await
            .map_err(|e| OracleError::Unavailable(format!("oracle stdin closed: {e}")))?;
        proc.stdin
            .flush()
            .await
            .map_err(|e| OracleError::Unavailable(format!("oracle stdin closed: {e}")))?;

        let reply = proc
            .stdout
            .next_line()
            .await
            .map_err(|e| OracleError::Unavailable(format!("oracle stdout closed: {e}")))?
            .ok_or_else(|| OracleError::Unavailable("oracle process exited".to_string()))?;

        serde_json::from_str(&reply)
            .map_err(|e| OracleError::Unavailable(format!("unparsable oracle reply: {e}")))
    }
}

#[async_trait::async_trait]
impl Validator for ProcessValidator {
    async fn init(&self) -> Result<(), OracleError> {
        let mut guard = self.handle.lock().await;
        if guard.is_none() {
            *guard = Some(self.spawn()?);
        }
        Ok(())
    }

    async fn validate(&self, tree: &Value) -> Result<(), OracleError> {
        let mut guard = self.handle.lock().await;
        if guard.is_none() {
            *guard = Some(self.spawn()?);
        }
        let Some(proc) = guard.as_mut() else {
            return Err(OracleError::Unavailable(
                "oracle process not running".to_string(),
            ));
        };

        debug!("Sending tree to oracle process");
        match Self::roundtrip(proc, tree).await {
            Ok(verdict) if verdict.ok => Ok(()),
            Ok(verdict) => Err(OracleError::Rejected(verdict.rejection_message())),
            Err(e) => {
                // A broken pipe means the child is gone; drop the handle so
                // the next call respawns rather than talking to a corpse.
                warn!("Oracle process transport failure: {}", e);
                *guard = None;
                Err(e)
            }
        }
    }

    async fn shutdown(&self) -> Result<(), OracleError> {
        let mut guard = self.handle.lock().await;
        if let Some(mut proc) = guard.take() {
            if let Err(e) = proc.child.kill().await {
                warn!("Failed to kill oracle process: {}", e);
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "process"
    }
}
