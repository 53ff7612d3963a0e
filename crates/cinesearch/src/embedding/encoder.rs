use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use tokio::time::timeout;

use crate::error::{Result, SearchError};

/// Maps one query string to a vector in the record embedding space
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueryEncoder: Send + Sync {
  async fn encode(&self, text: &str) -> Result<Vec<f32>>;
}

/// Request line sent to the embedding daemon
#[derive(Debug, Serialize, Deserialize)]
pub struct EncodeRequest {
  pub texts: Vec<String>,
  pub id: String,
}

/// Response line returned by the embedding daemon
#[derive(Debug, Serialize, Deserialize)]
pub struct EncodeResponse {
  pub embeddings: Vec<Vec<f32>>,
  pub id: String,
  pub error: Option<String>,
}

/// Client of the embedding daemon's newline-delimited JSON socket protocol
///
/// One connection per request. The whole round trip is bounded by `timeout`.
#[derive(Debug, Clone)]
pub struct DaemonEncoder {
  socket_path: PathBuf,
  timeout: Duration,
}

impl DaemonEncoder {
  pub fn new<P: AsRef<Path>>(socket_path: P, timeout: Duration) -> Self {
    Self { socket_path: socket_path.as_ref().to_path_buf(), timeout }
  }

  async fn round_trip(&self, request: &EncodeRequest) -> Result<EncodeResponse> {
    let mut stream = UnixStream::connect(&self.socket_path).await.map_err(|e| {
      SearchError::EncodingFailure(format!(
        "encoder daemon unreachable at {}: {e}",
        self.socket_path.display()
      ))
    })?;

    let mut line = serde_json::to_string(request).map_err(failure)?;
    line.push('\n');
    stream.write_all(line.as_bytes()).await.map_err(failure)?;

    let mut reader = BufReader::new(stream);
    let mut response = String::new();
    reader.read_line(&mut response).await.map_err(failure)?;

    serde_json::from_str(response.trim())
      .map_err(|e| SearchError::EncodingFailure(format!("invalid daemon response: {e}")))
  }
}

fn failure<E: std::fmt::Display>(e: E) -> SearchError {
  SearchError::EncodingFailure(e.to_string())
}

#[async_trait]
impl QueryEncoder for DaemonEncoder {
  async fn encode(&self, text: &str) -> Result<Vec<f32>> {
    if text.trim().is_empty() {
      return Err(SearchError::EncodingFailure("empty query".to_string()));
    }

    let request =
      EncodeRequest { texts: vec![text.to_string()], id: uuid::Uuid::new_v4().to_string() };

    let response = timeout(self.timeout, self.round_trip(&request)).await.map_err(|_| {
      SearchError::EncodingFailure(format!("encoder timed out after {:?}", self.timeout))
    })??;

    if let Some(error) = response.error {
      return Err(SearchError::EncodingFailure(format!("daemon error: {error}")));
    }
    if response.id != request.id {
      return Err(SearchError::EncodingFailure("daemon answered a different request".to_string()));
    }

    response
      .embeddings
      .into_iter()
      .next()
      .filter(|vector| !vector.is_empty())
      .ok_or_else(|| SearchError::EncodingFailure("daemon returned no embedding".to_string()))
  }
}
