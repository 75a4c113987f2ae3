// src/config.rs
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use crate::errors::{Result, GraderError};

pub const DEFAULT_ENDPOINT: &str = "wss://dyalog.run/api/v0/ws/execute";
pub const DEFAULT_LANGUAGE: &str = "dyalog_apl";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_GRACE_MS: u64 = 2000;

/// Settings for the remote execution service.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    pub endpoint: String,
    pub language: String,
    /// Ceiling sent to the service, which enforces it.
    pub timeout_secs: u64,
    /// Extra time allowed locally on top of `timeout_secs` before giving up.
    pub grace: Duration,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            grace: Duration::from_millis(DEFAULT_GRACE_MS),
        }
    }
}

impl ExecutorConfig {
    /// Local bound on one whole round trip.
    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.timeout_secs) + self.grace
    }
}

/// High-level application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_url: String,
    pub problems_dir: PathBuf,
    pub harness_path: Option<PathBuf>,
    pub executor: ExecutorConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => default_database_url()?,
        };
        if !database_url.starts_with("sqlite:") {
            return Err(GraderError::Config(
                "DATABASE_URL must start with 'sqlite:'".to_string(),
            ));
        }

        let problems_dir = std::env::var("PROBLEMS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("problems"));
        let harness_path = std::env::var("HARNESS_PATH").ok().map(PathBuf::from);

        let executor = ExecutorConfig {
            endpoint: std::env::var("EXECUTOR_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            language: std::env::var("EXECUTOR_LANGUAGE")
                .unwrap_or_else(|_| DEFAULT_LANGUAGE.to_string()),
            timeout_secs: env_u64("EXECUTOR_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            grace: Duration::from_millis(env_u64("EXECUTOR_GRACE_MS", DEFAULT_GRACE_MS)?),
        };
        if executor.timeout_secs == 0 {
            return Err(GraderError::Config(
                "EXECUTOR_TIMEOUT_SECS must be at least 1".to_string(),
            ));
        }

        Ok(AppConfig { bind_addr, database_url, problems_dir, harness_path, executor })
    }
}

fn env_u64(name: &str, default: u64) -> Result<u64> {
    match std::env::var(name) {
        Ok(raw) => parse_u64(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_u64(name: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|_| GraderError::Config(format!("{} must be a whole number, got '{}'", name, raw)))
}

fn default_database_url() -> Result<String> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| GraderError::Config("DATABASE_URL not set and no data directory found".to_string()))?;
    Ok(format!("sqlite:{}", data_dir.join("apl-grader").join("points.db").display()))
}

/// Grading options for one problem. Opaque to the grader; interpreted by the harness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProblemConfig(serde_json::Value);

impl ProblemConfig {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

/// All known problems, keyed by problem ID. Read once at startup.
#[derive(Debug, Clone, Default)]
pub struct ProblemCatalog {
    problems: HashMap<String, ProblemConfig>,
}

impl ProblemCatalog {
    pub fn from_map(problems: HashMap<String, ProblemConfig>) -> Self {
        Self { problems }
    }

    /// Loads every `*.json` and `*.toml` file in `dir`. The file stem is the problem ID.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(GraderError::Config(format!(
                "Problem directory {} does not exist",
                dir.display()
            )));
        }

        let mut problems = HashMap::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let config = match path.extension().and_then(|e| e.to_str()) {
                Some("json") => parse_problem(&path, |text| Ok(serde_json::from_str(text)?))?,
                Some("toml") => parse_problem(&path, |text| Ok(toml::from_str(text)?))?,
                _ => {
                    log::debug!("Skipping non-problem file {}", path.display());
                    continue;
                }
            };
            problems.insert(id.to_string(), config);
        }

        log::info!("Loaded {} problem(s) from {}", problems.len(), dir.display());
        Ok(Self { problems })
    }

    pub fn get(&self, id_problem: &str) -> Option<&ProblemConfig> {
        self.problems.get(id_problem)
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}

fn parse_problem(
    path: &Path,
    parse: impl Fn(&str) -> Result<serde_json::Value>,
) -> Result<ProblemConfig> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)
        .map(ProblemConfig::new)
        .map_err(|e| GraderError::ProblemFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
}
