// tests/common/mod.rs
#![allow(dead_code)]

use apl_grader::errors::{GraderError, Result};
use apl_grader::executor::CodeExecutor;
use apl_grader::models::ExecutionResult;
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Stands in for the execution service, replaying queued outcomes in order.
pub struct ScriptedExecutor {
    outcomes: Mutex<VecDeque<Result<ExecutionResult>>>,
    payloads: Mutex<Vec<String>>,
}

impl ScriptedExecutor {
    pub fn new(outcomes: Vec<Result<ExecutionResult>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            payloads: Mutex::new(Vec::new()),
        }
    }

    pub fn payloads(&self) -> Vec<String> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl CodeExecutor for ScriptedExecutor {
    async fn execute(&self, payload: &str) -> Result<ExecutionResult> {
        self.payloads.lock().unwrap().push(payload.to_string());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GraderError::ConnectionClosed))
    }

    fn timeout_secs(&self) -> u64 {
        5
    }
}

/// A clean run whose stdout is `report`.
pub fn reported(report: &str) -> Result<ExecutionResult> {
    Ok(ExecutionResult {
        timed_out: false,
        exit_status: 0,
        stdout: format!("{}\n", report),
        stderr: String::new(),
    })
}

pub const PASSED_ALL: &str = r#"{"status":2}"#;
pub const PASSED_BASIC: &str = r#"{"status":1,"larg":"'weights'","rarg":"'table.csv'"}"#;
pub const FAILED: &str = r#"{"status":0,"larg":"2 2","rarg":"⍳4"}"#;

pub async fn memory_pool() -> SqlitePool {
    apl_grader::database::connect("sqlite::memory:", 1)
        .await
        .expect("in-memory ledger")
}
