// src/grader.rs
use crate::classifier::{self, timeout_feedback};
use crate::config::ProblemConfig;
use crate::database;
use crate::encoder::SubmissionEncoder;
use crate::errors::{GraderError, Result};
use crate::executor::CodeExecutor;
use crate::harness::Harness;
use crate::models::{Submission, Verdict};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Instant;

pub const SERVICE_UNAVAILABLE: &str = "Could not run your code right now. Please try again later.";

/// Runs submissions through encoder, executor and classifier.
pub struct Grader {
    encoder: SubmissionEncoder,
    executor: Arc<dyn CodeExecutor>,
}

impl Grader {
    pub fn new(harness: Harness, executor: Arc<dyn CodeExecutor>) -> Self {
        Self {
            encoder: SubmissionEncoder::new(harness),
            executor,
        }
    }

    /// Grades `code` against `options`. Never fails: every fault becomes an
    /// `Error` verdict.
    pub async fn evaluate(&self, code: &str, options: &ProblemConfig) -> Verdict {
        let payload = match self.encoder.encode(code, options) {
            Ok(payload) => payload,
            Err(e) => {
                log::error!("Failed to encode submission: {}", e);
                return Verdict::error(SERVICE_UNAVAILABLE);
            }
        };

        match self.executor.execute(&payload).await {
            Ok(result) => classifier::classify(&result, self.executor.timeout_secs()),
            Err(e) => verdict_for_failure(&e, self.executor.timeout_secs()),
        }
    }

    /// Grades a submission and records the points it earned.
    /// Zero-point outcomes are recorded too, so a first attempt is always visible.
    pub async fn submit(
        &self,
        pool: &SqlitePool,
        submission: &Submission,
        options: &ProblemConfig,
    ) -> Result<Verdict> {
        let start = Instant::now();
        log::info!(
            "🎯 Grading submission {} (user {}, problem {})",
            submission.id,
            submission.id_user,
            submission.id_problem
        );

        let verdict = self.evaluate(&submission.code, options).await;

        log::info!(
            "Submission {} graded {} ({} points) in {}ms",
            submission.id,
            verdict.status,
            verdict.points(),
            start.elapsed().as_millis()
        );

        database::record_score(pool, &submission.id_user, &submission.id_problem, verdict.points())
            .await?;

        Ok(verdict)
    }
}

fn verdict_for_failure(error: &GraderError, timeout_secs: u64) -> Verdict {
    match error {
        GraderError::Deadline { .. } => Verdict::error(timeout_feedback(timeout_secs)),
        e => {
            if e.is_transport() {
                log::error!("Execution service unavailable: {}", e);
            } else {
                log::error!("Unexpected grading failure: {}", e);
            }
            Verdict::error(SERVICE_UNAVAILABLE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExecutionResult, GradingStatus};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Returns a canned outcome and remembers the payload it was given.
    struct Canned {
        outcome: Mutex<Option<Result<ExecutionResult>>>,
        seen: Mutex<Option<String>>,
    }

    impl Canned {
        fn new(outcome: Result<ExecutionResult>) -> Arc<Self> {
            Arc::new(Self {
                outcome: Mutex::new(Some(outcome)),
                seen: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl CodeExecutor for Canned {
        async fn execute(&self, payload: &str) -> Result<ExecutionResult> {
            *self.seen.lock().unwrap() = Some(payload.to_string());
            self.outcome.lock().unwrap().take().expect("executed once")
        }

        fn timeout_secs(&self) -> u64 {
            5
        }
    }

    fn stdout(text: &str) -> Result<ExecutionResult> {
        Ok(ExecutionResult {
            timed_out: false,
            exit_status: 0,
            stdout: text.to_string(),
            stderr: String::new(),
        })
    }

    #[tokio::test]
    async fn test_evaluate_sends_bundled_payload() {
        let executor = Canned::new(stdout("{\"status\":2}"));
        let grader = Grader::new(Harness::from_source("⍝ harness"), executor.clone());

        let verdict = grader
            .evaluate("{⍺⍴⍵}", &ProblemConfig::new(json!({"basic": []})))
            .await;

        assert_eq!(verdict.status, GradingStatus::PassedAll);
        let payload = executor.seen.lock().unwrap().clone().unwrap();
        assert!(payload.starts_with("⍝ harness\n"));
        assert!(payload.contains("user_code←0⎕JSON'\"{⍺⍴⍵}\"'"));
        assert!(payload.ends_with("⎕←1⎕JSON opts ⎕SE.Test.Run user_code"));
    }

    #[tokio::test]
    async fn test_transport_failure_degrades_to_error() {
        let grader = Grader::new(Harness::bundled(), Canned::new(Err(GraderError::ConnectionClosed)));
        let verdict = grader.evaluate("⍴", &ProblemConfig::new(json!({}))).await;
        assert_eq!(verdict, Verdict::error(SERVICE_UNAVAILABLE));
    }

    #[tokio::test]
    async fn test_local_deadline_reads_as_timeout() {
        let grader = Grader::new(Harness::bundled(), Canned::new(Err(GraderError::Deadline { secs: 7 })));
        let verdict = grader.evaluate("⍴", &ProblemConfig::new(json!({}))).await;
        assert_eq!(verdict, Verdict::error("Execution timed out (5s)"));
    }
}
