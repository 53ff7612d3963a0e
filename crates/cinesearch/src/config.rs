//! Engine configuration
//!
//! Loaded from YAML (`CINESEARCH_CONFIG`, falling back to
//! `~/.cinesearch/config.yaml`). Every field has a default, so a missing file
//! or a partial file is fine. A few environment variables override the file
//! for container deployments.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "CINESEARCH_CONFIG";
pub const CATALOG_ENV: &str = "CINESEARCH_CATALOG";
pub const EMBEDDINGS_ENV: &str = "CINESEARCH_EMBEDDINGS";
pub const ENCODER_SOCKET_ENV: &str = "CINESEARCH_ENCODER_SOCKET";

/// Top-level configuration for a search engine instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
  /// Catalog JSON file
  #[serde(default = "default_catalog_path")]
  pub catalog_path: PathBuf,
  /// Embedding files, probed in order
  #[serde(default = "default_embedding_paths")]
  pub embedding_paths: Vec<PathBuf>,
  /// Unix socket of the query encoder daemon
  #[serde(default = "default_encoder_socket")]
  pub encoder_socket: PathBuf,
  /// Upper bound for one encoder round trip
  #[serde(default = "default_encoder_timeout_ms")]
  pub encoder_timeout_ms: u64,
  /// Maximum number of cached result lists
  #[serde(default = "default_cache_capacity")]
  pub cache_capacity: usize,
  /// Result count when the caller does not pass one
  #[serde(default = "default_top_k")]
  pub default_top_k: usize,
  #[serde(default)]
  pub ranking: RankingConfig,
}

/// Weights and thresholds of the combined relevance score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
  #[serde(default = "default_text_weight")]
  pub text_weight: f32,
  #[serde(default = "default_year_weight")]
  pub year_weight: f32,
  #[serde(default = "default_genre_weight")]
  pub genre_weight: f32,
  /// Genre signal added per matching hinted genre
  #[serde(default = "default_genre_boost")]
  pub genre_boost: f32,
  /// Hits scoring at or below this are dropped
  #[serde(default = "default_relevance_floor")]
  pub relevance_floor: f32,
}

fn default_catalog_path() -> PathBuf {
  PathBuf::from("movies.json")
}
fn default_embedding_paths() -> Vec<PathBuf> {
  vec![
    PathBuf::from("/app/movies_embeddings.json"),
    PathBuf::from("movies_embeddings.json"),
    PathBuf::from("../movies_embeddings.json"),
  ]
}
fn default_encoder_socket() -> PathBuf {
  PathBuf::from("/tmp/cinesearch_embeddings.sock")
}
fn default_encoder_timeout_ms() -> u64 {
  5_000
}
fn default_cache_capacity() -> usize {
  1000
}
fn default_top_k() -> usize {
  10
}
fn default_text_weight() -> f32 {
  0.85
}
fn default_year_weight() -> f32 {
  0.05
}
fn default_genre_weight() -> f32 {
  0.10
}
fn default_genre_boost() -> f32 {
  0.1
}
fn default_relevance_floor() -> f32 {
  0.1
}

impl Default for RankingConfig {
  fn default() -> Self {
    Self {
      text_weight: default_text_weight(),
      year_weight: default_year_weight(),
      genre_weight: default_genre_weight(),
      genre_boost: default_genre_boost(),
      relevance_floor: default_relevance_floor(),
    }
  }
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      catalog_path: default_catalog_path(),
      embedding_paths: default_embedding_paths(),
      encoder_socket: default_encoder_socket(),
      encoder_timeout_ms: default_encoder_timeout_ms(),
      cache_capacity: default_cache_capacity(),
      default_top_k: default_top_k(),
      ranking: RankingConfig::default(),
    }
  }
}

impl EngineConfig {
  /// Load configuration from a YAML file
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
      .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_yaml::from_str(&content)
      .with_context(|| format!("Invalid config file {}", path.display()))
  }

  /// Load from the configured location (or defaults), then apply env overrides
  pub fn load() -> Result<Self> {
    let mut config = match config_path() {
      Some(path) if path.exists() => Self::load_from_file(&path)?,
      _ => Self::default(),
    };

    config.apply_env_overrides();
    Ok(config)
  }

  /// Like [`EngineConfig::load`] but with an explicit file that must exist
  pub fn load_with(path: Option<&Path>) -> Result<Self> {
    match path {
      Some(path) => {
        let mut config = Self::load_from_file(path)?;
        config.apply_env_overrides();
        Ok(config)
      }
      None => Self::load(),
    }
  }

  pub fn apply_env_overrides(&mut self) {
    if let Some(catalog) = non_empty_env(CATALOG_ENV) {
      self.catalog_path = PathBuf::from(catalog);
    }
    if let Some(embeddings) = non_empty_env(EMBEDDINGS_ENV) {
      self.embedding_paths = std::env::split_paths(&embeddings).collect();
    }
    if let Some(socket) = non_empty_env(ENCODER_SOCKET_ENV) {
      self.encoder_socket = PathBuf::from(socket);
    }
  }
}

fn non_empty_env(name: &str) -> Option<String> {
  std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Config file location: `CINESEARCH_CONFIG`, else `~/.cinesearch/config.yaml`
pub fn config_path() -> Option<PathBuf> {
  if let Some(custom) = non_empty_env(CONFIG_ENV) {
    return Some(PathBuf::from(custom));
  }

  dirs::home_dir().map(|home| home.join(".cinesearch").join("config.yaml"))
}

/// Directory for server-side state such as the event log
pub fn state_dir() -> PathBuf {
  dirs::home_dir()
    .unwrap_or_else(std::env::temp_dir)
    .join(".cinesearch")
}
