// src/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraderError {
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML problem file: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to parse problem file '{path}': {reason}")]
    ProblemFile { path: String, reason: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Failed to encode execution request: {0}")]
    WireEncode(#[from] rmp_serde::encode::Error),

    #[error("Failed to decode execution response: {0}")]
    WireDecode(#[from] rmp_serde::decode::Error),

    #[error("Execution output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Execution service closed the connection before responding")]
    ConnectionClosed,

    #[error("No response from execution service within {secs}s")]
    Deadline { secs: u64 },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GraderError {
    /// True for failures of the execution round trip itself, as opposed to
    /// startup or storage problems.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            GraderError::WebSocket(_)
                | GraderError::WireEncode(_)
                | GraderError::WireDecode(_)
                | GraderError::Utf8(_)
                | GraderError::ConnectionClosed
        )
    }
}

pub type Result<T> = std::result::Result<T, GraderError>;
