// src/classifier.rs
use serde::Deserialize;

use crate::models::{ExecutionResult, GradingStatus, Verdict};

pub const BASIC_FAILED: &str = "Basic test failed.";
pub const PASSED_BASIC: &str = "Passed basic tests, well done!";
pub const EXTRA_CASES: &str = "For extra points, consider cases like";
pub const PASSED_ALL: &str = "Congratulations! All tests passed.";
pub const UNREADABLE_REPORT: &str = "The grader produced an unreadable report.";

/// Report the harness prints to stdout.
#[derive(Debug, Deserialize)]
struct HarnessReport {
    status: Option<i64>,
    larg: Option<String>,
    rarg: Option<String>,
}

pub fn timeout_feedback(timeout_secs: u64) -> String {
    format!("Execution timed out ({}s)", timeout_secs)
}

/// Turns a raw execution result into a verdict. First matching rule wins:
/// timeout, non-zero exit, unreadable report, harness error, then the
/// harness status itself.
pub fn classify(result: &ExecutionResult, timeout_secs: u64) -> Verdict {
    if result.timed_out {
        return Verdict::error(timeout_feedback(timeout_secs));
    }

    if result.exit_status != 0 {
        return Verdict::error(result.stderr.clone());
    }

    let fields = match serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(result.stdout.trim()) {
        Ok(fields) => fields,
        Err(e) => {
            log::warn!("Unreadable harness report ({}): {:?}", e, result.stdout);
            return Verdict::error(UNREADABLE_REPORT);
        }
    };
    // Presence is what matters, `"error": null` included.
    if fields.contains_key("error") {
        let report = fields.get("report").and_then(|r| r.as_str()).unwrap_or_default();
        return Verdict::error(report);
    }
    let report: HarnessReport = match serde_json::from_value(serde_json::Value::Object(fields)) {
        Ok(report) => report,
        Err(e) => {
            log::warn!("Harness report has unexpected shape: {}", e);
            return Verdict::error(UNREADABLE_REPORT);
        }
    };

    let hint = argument_hint(report.larg.as_deref(), report.rarg.as_deref());
    match report.status {
        Some(0) => Verdict::new(GradingStatus::Failed, join(BASIC_FAILED, hint.as_deref())),
        Some(1) => {
            let extra = hint.map(|h| format!("{} {}", EXTRA_CASES, h));
            Verdict::new(GradingStatus::PassedBasic, join(PASSED_BASIC, extra.as_deref()))
        }
        Some(2) => Verdict::new(GradingStatus::PassedAll, PASSED_ALL),
        other => {
            log::warn!("Harness reported unknown status {:?}", other);
            Verdict::error(UNREADABLE_REPORT)
        }
    }
}

/// Describes the argument pattern of the case the submission got wrong.
fn argument_hint(larg: Option<&str>, rarg: Option<&str>) -> Option<String> {
    match (larg, rarg) {
        (Some(l), Some(r)) => Some(format!("{} as left argument and {} as right argument.", l, r)),
        (Some(l), None) => Some(format!("{} as left argument.", l)),
        (None, Some(r)) => Some(format!("{} as right argument.", r)),
        (None, None) => None,
    }
}

fn join(lead: &str, tail: Option<&str>) -> String {
    match tail {
        Some(tail) => format!("{} {}", lead, tail),
        None => lead.to_string(),
    }
}
