// src/executor/dyalog_run.rs

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use std::time::Instant;
use tokio_tungstenite::{connect_async, tungstenite, tungstenite::Message};

use crate::config::ExecutorConfig;
use crate::errors::{GraderError, Result};
use crate::executor::{CodeExecutor, ExecuteRequest, ExecuteResponse};
use crate::models::ExecutionResult;

/// Client for the dyalog.run WebSocket execution API.
///
/// Every call opens its own connection, sends one MessagePack request and
/// waits for one MessagePack response.
pub struct DyalogRunExecutor {
    config: ExecutorConfig,
}

impl DyalogRunExecutor {
    /// Creates a new `DyalogRunExecutor`.
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    async fn round_trip(&self, request: Vec<u8>) -> Result<ExecutionResult> {
        let (mut ws, _) = connect_async(self.config.endpoint.as_str()).await?;
        ws.send(Message::Binary(request)).await?;

        let response = loop {
            match ws.next().await {
                Some(Ok(Message::Binary(bytes))) => break ExecuteResponse::from_msgpack(&bytes)?,
                Some(Ok(Message::Close(_))) | None => return Err(GraderError::ConnectionClosed),
                Some(Ok(other)) => log::debug!("Ignoring non-binary frame: {:?}", other),
                Some(Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed)) => {
                    return Err(GraderError::ConnectionClosed);
                }
                Some(Err(e)) => return Err(e.into()),
            }
        };

        if let Err(e) = ws.close(None).await {
            log::debug!("Closing execution socket failed: {}", e);
        }

        response.into_result()
    }
}

#[async_trait]
impl CodeExecutor for DyalogRunExecutor {
    async fn execute(&self, payload: &str) -> Result<ExecutionResult> {
        let request = ExecuteRequest {
            language: &self.config.language,
            code: payload,
            timeout: self.config.timeout_secs,
        }
        .to_msgpack()?;

        log::debug!(
            "📡 Sending {} byte payload to {}",
            request.len(),
            self.config.endpoint
        );

        let deadline = self.config.deadline();
        let start = Instant::now();
        let outcome = tokio::time::timeout(deadline, self.round_trip(request)).await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(Ok(result)) => {
                log::info!(
                    "📥 Execution finished in {}ms (timed_out={}, status={})",
                    latency_ms,
                    result.timed_out,
                    result.exit_status
                );
                Ok(result)
            }
            Ok(Err(e)) => {
                log::warn!("Execution round trip failed after {}ms: {}", latency_ms, e);
                Err(e)
            }
            Err(_) => {
                log::warn!("No response from {} within {:?}", self.config.endpoint, deadline);
                Err(GraderError::Deadline { secs: deadline.as_secs() })
            }
        }
    }

    fn timeout_secs(&self) -> u64 {
        self.config.timeout_secs
    }
}
