// src/executor/mod.rs

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::models::ExecutionResult;

pub mod dyalog_run;

pub use dyalog_run::DyalogRunExecutor;

/// A sandboxed service able to run one APL script and report what happened.
///
/// The grader only talks to this trait, so tests can stand in a scripted
/// executor for the real remote service.
#[async_trait]
pub trait CodeExecutor: Send + Sync {
    /// Runs `payload` once. No retries.
    async fn execute(&self, payload: &str) -> Result<ExecutionResult>;

    /// Execution ceiling the service enforces, in seconds.
    fn timeout_secs(&self) -> u64;
}

/// Request record sent to the execution service as a MessagePack map.
#[derive(Debug, Serialize)]
pub struct ExecuteRequest<'a> {
    pub language: &'a str,
    pub code: &'a str,
    pub timeout: u64,
}

/// Response record received from the execution service.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExecuteResponse {
    pub timed_out: bool,
    #[serde(default)]
    pub status_value: Option<i64>,
    #[serde(with = "serde_bytes", default)]
    pub stdout: Vec<u8>,
    #[serde(with = "serde_bytes", default)]
    pub stderr: Vec<u8>,
}

impl ExecuteRequest<'_> {
    pub fn to_msgpack(&self) -> Result<Vec<u8>> {
        Ok(rmp_serde::to_vec_named(self)?)
    }
}

impl ExecuteResponse {
    pub fn from_msgpack(bytes: &[u8]) -> Result<Self> {
        Ok(rmp_serde::from_slice(bytes)?)
    }

    /// Converts the raw record into text the classifier can read.
    pub fn into_result(self) -> Result<ExecutionResult> {
        Ok(ExecutionResult {
            timed_out: self.timed_out,
            // The service omits the exit status when it kills a run.
            exit_status: self.status_value.unwrap_or(0),
            stdout: String::from_utf8(self.stdout)?,
            stderr: String::from_utf8(self.stderr)?,
        })
    }
}
