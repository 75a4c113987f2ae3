// src/models.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One grading request. Lives only for the duration of the request.
#[derive(Debug, Clone)]
pub struct Submission {
    pub id: String,
    pub id_problem: String,
    pub id_user: String,
    pub code: String,
}

impl Submission {
    pub fn new(id_problem: impl Into<String>, id_user: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            id_problem: id_problem.into(),
            id_user: id_user.into(),
            code: code.into(),
        }
    }
}

/// Decoded response of the remote execution service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub timed_out: bool,
    pub exit_status: i64,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradingStatus {
    Failed,
    PassedBasic,
    PassedAll,
    Error,
}

impl GradingStatus {
    /// Points awarded for a grading outcome.
    pub fn points(self) -> i64 {
        match self {
            GradingStatus::Error | GradingStatus::Failed => 0,
            GradingStatus::PassedBasic => 1,
            GradingStatus::PassedAll => 2,
        }
    }
}

impl std::fmt::Display for GradingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradingStatus::Failed => write!(f, "Failed"),
            GradingStatus::PassedBasic => write!(f, "PassedBasic"),
            GradingStatus::PassedAll => write!(f, "PassedAll"),
            GradingStatus::Error => write!(f, "Error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub status: GradingStatus,
    pub feedback: String,
}

impl Verdict {
    pub fn new(status: GradingStatus, feedback: impl Into<String>) -> Self {
        Self { status, feedback: feedback.into() }
    }

    pub fn error(feedback: impl Into<String>) -> Self {
        Self::new(GradingStatus::Error, feedback)
    }

    pub fn points(&self) -> i64 {
        self.status.points()
    }
}

/// Best score stored for one (user, problem) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointsRecord {
    pub id_user: String,
    pub id_problem: String,
    pub points: i64,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTotal {
    pub id_user: String,
    pub points: i64,
}
