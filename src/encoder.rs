// src/encoder.rs
use crate::config::ProblemConfig;
use crate::errors::Result;
use crate::harness::Harness;

/// Statement that runs the harness and prints its report as JSON.
const EPILOGUE: &str = "⎕←1⎕JSON opts ⎕SE.Test.Run user_code";

/// Escapes `text` for embedding between APL single quotes.
/// The only character needing treatment is the quote itself, which is doubled.
pub fn escape_literal(text: &str) -> String {
    text.replace('\'', "''")
}

/// Builds the single source blob sent to the execution service.
#[derive(Debug, Clone)]
pub struct SubmissionEncoder {
    harness: Harness,
}

impl SubmissionEncoder {
    pub fn new(harness: Harness) -> Self {
        Self { harness }
    }

    /// Bundles harness, user code and grading options into one APL script.
    ///
    /// Both the code and the options travel as JSON text inside a quoted literal
    /// and are turned back into values by `0⎕JSON` on the remote side, so control
    /// characters and quotes in the user's code survive unchanged.
    pub fn encode(&self, code: &str, options: &ProblemConfig) -> Result<String> {
        let code_literal = escape_literal(&serde_json::to_string(code)?);
        let options_literal = escape_literal(&serde_json::to_string(options.as_value())?);

        let mut submission = String::with_capacity(
            self.harness.source().len() + code_literal.len() + options_literal.len() + 64,
        );
        submission.push_str(self.harness.source());
        if !submission.ends_with('\n') {
            submission.push('\n');
        }
        submission.push_str(&format!("user_code←0⎕JSON'{}'\n", code_literal));
        submission.push_str(&format!("opts←0⎕JSON'{}'\n", options_literal));
        submission.push_str(EPILOGUE);
        Ok(submission)
    }
}
