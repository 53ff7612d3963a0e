use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

/// Failure kinds of the search core
///
/// Load-time kinds (`DimensionMismatch`, `MissingSource`, `Catalog`) abort only
/// the load attempt; the previously serving generation stays live. Query-time
/// kinds (`EncodingFailure`, `EmptyIndex`) are degraded to an empty result by
/// [`crate::engine::SearchEngine::search`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SearchError {
  /// Embedding count differs from record count, or vectors differ in width
  #[error("Dimension mismatch: expected {expected}, found {found}")]
  DimensionMismatch { expected: usize, found: usize },

  #[error("No valid embedding source found (tried {} candidates: {})", .tried.len(), display_paths(.tried))]
  MissingSource { tried: Vec<PathBuf> },

  #[error("Failed to encode query: {0}")]
  EncodingFailure(String),

  #[error("No records loaded")]
  EmptyIndex,

  #[error("Failed to load catalog: {0}")]
  Catalog(String),
}

fn display_paths(paths: &[PathBuf]) -> String {
  paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
}
