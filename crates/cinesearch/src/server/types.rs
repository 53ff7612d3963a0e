//! REST API types with schemars annotations for OpenAPI generation

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SearchError;
use crate::record::{Record, SearchHit};

// Base Response Structure
// ======================

/// Base response object for all API endpoints
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct BaseResponse<T> {
  /// API versioning information
  pub versioning: VersionInfo,

  /// Transaction ID for logging correlation
  pub transaction_id: Uuid,

  /// Optional error information
  #[serde(skip_serializing_if = "Vec::is_empty", default)]
  pub errors: Vec<ApiError>,

  /// Response data
  #[serde(flatten)]
  pub data: T,
}

/// API versioning information
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct VersionInfo {
  pub latest: String,
  pub requested: String,
  pub resolved: String,
}

impl VersionInfo {
  fn current() -> Self {
    let version = env!("CARGO_PKG_VERSION");
    Self { latest: version.to_string(), requested: version.to_string(), resolved: version.to_string() }
  }
}

/// API error information
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ApiError {
  /// Error key, unique to the error source
  pub key: String,

  /// Human readable error message
  pub message: String,

  /// Additional error context
  #[serde(default)]
  pub context: serde_json::Value,
}

impl<T> BaseResponse<T> {
  pub fn success(data: T, transaction_id: Uuid) -> Self {
    Self { versioning: VersionInfo::current(), transaction_id, errors: Vec::new(), data }
  }

  /// Data accompanied by errors that did not fail the request
  pub fn partial(data: T, errors: Vec<ApiError>, transaction_id: Uuid) -> Self {
    Self { versioning: VersionInfo::current(), transaction_id, errors, data }
  }

  pub fn error(errors: Vec<ApiError>, transaction_id: Uuid) -> BaseResponse<()> {
    BaseResponse { versioning: VersionInfo::current(), transaction_id, errors, data: () }
  }
}

impl ApiError {
  pub fn new(key: &str, message: &str) -> Self {
    Self { key: key.to_string(), message: message.to_string(), context: serde_json::Value::Null }
  }
}

impl From<&SearchError> for ApiError {
  fn from(error: &SearchError) -> Self {
    let key = match error {
      SearchError::DimensionMismatch { .. } => "dimension_mismatch",
      SearchError::MissingSource { .. } => "missing_source",
      SearchError::EncodingFailure(_) => "encoding_failure",
      SearchError::EmptyIndex => "empty_index",
      SearchError::Catalog(_) => "catalog_unavailable",
    };
    Self::new(key, &error.to_string())
  }
}

// Status Endpoint
// ===============

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct StatusResponse {
  pub status: String,
  pub version: String,
  pub generation: u64,
  pub records: usize,
}

// Search Endpoints
// ================

/// Query string of `GET /search`
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchParams {
  #[serde(default)]
  pub query: String,
  pub top_k: Option<usize>,
  /// Explicit year; replaces any year named in the query
  pub year: Option<String>,
  /// Explicit genre; added to the genres named in the query
  pub genre: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchResponse {
  pub query: String,
  pub total: usize,
  pub results: Vec<SearchHit>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct MovieResponse {
  pub movie: Record,
}

// Index Endpoints
// ===============

pub type ReloadResponse = crate::engine::ReloadSummary;
pub type StatsResponse = crate::engine::EngineStats;

// Facet Endpoints
// ===============

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct FacetResponse {
  pub values: Vec<String>,
}

// Logs Endpoint
// =============

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct LogsParams {
  /// Most recent entries to return (default 100)
  pub limit: Option<usize>,
  /// Only entries at this level
  pub level: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LogsResponse {
  pub logs: Vec<LogEntry>,
}

/// Individual log entry (re-exported from marquee)
pub type LogEntry = marquee::event_log::LogEntry;
