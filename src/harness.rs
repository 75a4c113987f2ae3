// src/harness.rs
use crate::errors::{GraderError, Result};
use std::path::Path;
use std::sync::Arc;

const BUNDLED_HARNESS: &str = include_str!("../harness/test_namespace.apl");

/// APL preamble that defines `⎕SE.Test.Run` inside the execution sandbox.
/// Loaded once at startup and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct Harness {
    source: Arc<str>,
}

impl Harness {
    /// The harness compiled into the binary.
    pub fn bundled() -> Self {
        Self::from_source(BUNDLED_HARNESS)
    }

    pub fn from_source(source: impl Into<Arc<str>>) -> Self {
        Self { source: source.into() }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        if source.trim().is_empty() {
            return Err(GraderError::Config(format!(
                "Harness file {} is empty",
                path.display()
            )));
        }
        log::info!("Loaded grading harness from {}", path.display());
        Ok(Self::from_source(source))
    }

    /// Uses `path` when given, the bundled harness otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::bundled()),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}
