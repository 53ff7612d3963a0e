//! The search engine: one live generation, a ranker with its cache, and the
//! collaborators it reloads from.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

use crate::cache::{CacheKey, CacheStats, CachedHits};
use crate::catalog::{CatalogStore, JsonCatalog};
use crate::config::{EngineConfig, RankingConfig};
use crate::embedding::{DaemonEncoder, EmbeddingSource, FileEmbeddingSource, QueryEncoder};
use crate::error::{Result, SearchError};
use crate::generation::{Generation, GenerationInfo};
use crate::ranker::Ranker;
use crate::record::{Record, SearchHit};

/// Outcome of a successful reload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReloadSummary {
  pub generation: u64,
  pub records: usize,
  pub dimension: usize,
  pub elapsed_ms: u64,
}

/// Engine-wide counters and the serving generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EngineStats {
  pub generation: GenerationInfo,
  pub cache: CacheStats,
  pub default_top_k: usize,
}

pub struct EngineBuilder {
  catalog: Arc<dyn CatalogStore>,
  embeddings: Arc<dyn EmbeddingSource>,
  encoder: Arc<dyn QueryEncoder>,
  ranking: RankingConfig,
  cache_capacity: usize,
  default_top_k: usize,
}

impl EngineBuilder {
  pub fn new(
    catalog: Arc<dyn CatalogStore>,
    embeddings: Arc<dyn EmbeddingSource>,
    encoder: Arc<dyn QueryEncoder>,
  ) -> Self {
    let defaults = EngineConfig::default();
    Self {
      catalog,
      embeddings,
      encoder,
      ranking: defaults.ranking,
      cache_capacity: defaults.cache_capacity,
      default_top_k: defaults.default_top_k,
    }
  }

  pub fn ranking(mut self, ranking: RankingConfig) -> Self {
    self.ranking = ranking;
    self
  }

  pub fn cache_capacity(mut self, capacity: usize) -> Self {
    self.cache_capacity = capacity;
    self
  }

  pub fn default_top_k(mut self, top_k: usize) -> Self {
    self.default_top_k = top_k;
    self
  }

  /// Load the first generation and start serving it
  pub fn open(self) -> Result<SearchEngine> {
    let first = load_generation(self.catalog.as_ref(), self.embeddings.as_ref(), 1)?;
    let ranker = Ranker::new(self.ranking, self.cache_capacity);
    ranker.cache().clear(first.number);

    marquee::info!(
      "Serving generation {} with {} records ({} dimensions)",
      first.number,
      first.len(),
      first.embeddings.dimension()
    );

    Ok(SearchEngine {
      catalog: self.catalog,
      embeddings: self.embeddings,
      encoder: self.encoder,
      ranker,
      current: RwLock::new(Arc::new(first)),
      reload_lock: Mutex::new(()),
      default_top_k: AtomicUsize::new(self.default_top_k),
    })
  }
}

fn load_generation(
  catalog: &dyn CatalogStore,
  embeddings: &dyn EmbeddingSource,
  number: u64,
) -> Result<Generation> {
  let records = catalog.load_records()?;
  let vectors = embeddings.load_embeddings(records.len())?;
  Generation::build(number, records, vectors)
}

pub struct SearchEngine {
  catalog: Arc<dyn CatalogStore>,
  embeddings: Arc<dyn EmbeddingSource>,
  encoder: Arc<dyn QueryEncoder>,
  ranker: Ranker,
  current: RwLock<Arc<Generation>>,
  reload_lock: Mutex<()>,
  default_top_k: AtomicUsize,
}

impl SearchEngine {
  /// Engine over the configured catalog file, embedding files and encoder socket
  pub fn from_config(config: &EngineConfig) -> Result<Self> {
    let catalog = Arc::new(JsonCatalog::new(&config.catalog_path));
    let embeddings = Arc::new(FileEmbeddingSource::new(&config.embedding_paths));
    let encoder = Arc::new(DaemonEncoder::new(
      &config.encoder_socket,
      Duration::from_millis(config.encoder_timeout_ms),
    ));

    EngineBuilder::new(catalog, embeddings, encoder)
      .ranking(config.ranking.clone())
      .cache_capacity(config.cache_capacity)
      .default_top_k(config.default_top_k)
      .open()
  }

  /// The serving generation
  pub fn current(&self) -> Arc<Generation> {
    self.current.read().unwrap_or_else(|e| e.into_inner()).clone()
  }

  pub fn default_top_k(&self) -> usize {
    self.default_top_k.load(Ordering::Relaxed)
  }

  /// Ranked hits for a query; any failure degrades to an empty list
  pub async fn search(
    &self,
    query: &str,
    top_k: usize,
    year_filter: Option<&str>,
    genre_filter: Option<&str>,
  ) -> Vec<SearchHit> {
    match self.try_search(query, top_k, year_filter, genre_filter).await {
      Ok(hits) => hits,
      Err(e) => {
        marquee::warn!("Search for '{query}' failed: {e}");
        Vec::new()
      }
    }
  }

  /// Ranked hits for a query, or the reason there are none
  pub async fn try_search(
    &self,
    query: &str,
    top_k: usize,
    year_filter: Option<&str>,
    genre_filter: Option<&str>,
  ) -> Result<Vec<SearchHit>> {
    let key = CacheKey::new(query, year_filter, genre_filter, top_k);
    if let Some(hits) = self.ranker.cache().lookup(&key) {
      marquee::debug!("Cache hit for '{query}'");
      return Ok(hits.to_vec());
    }

    let generation = self.current();
    if generation.is_empty() {
      return Err(SearchError::EmptyIndex);
    }

    let mut parsed = generation.analyzer.analyze(query);
    parsed.apply_filters(year_filter, genre_filter);

    // A query made only of years still carries meaning for the encoder
    let text = if parsed.clean_query.is_empty() { query.trim() } else { parsed.clean_query.as_str() };
    if text.is_empty() {
      return Err(SearchError::EncodingFailure("empty query".to_string()));
    }

    let vector = self.encoder.encode(text).await?;
    let hits: CachedHits =
      self.ranker.rank(&generation, &vector, parsed.year_hint, &parsed.genres, top_k)?.into();

    self.ranker.cache().put(key, generation.number, hits.clone());
    marquee::debug!(
      "'{query}' -> {} hits (year hint {:?}, genres {:?})",
      hits.len(),
      parsed.hinted_year(),
      parsed.genres
    );
    Ok(hits.to_vec())
  }

  /// Rebuild the generation from the catalog and embedding sources
  ///
  /// The new generation replaces the old one only once fully built; on
  /// failure the old generation keeps serving. The cache and its counters
  /// are reset on success.
  pub fn reload(&self) -> Result<ReloadSummary> {
    let _serialized = self.reload_lock.lock().unwrap_or_else(|e| e.into_inner());
    let started = Instant::now();
    let number = self.current().number + 1;

    let generation = match load_generation(self.catalog.as_ref(), self.embeddings.as_ref(), number) {
      Ok(generation) => generation,
      Err(e) => {
        marquee::error!("Reload failed, keeping generation {}: {e}", number - 1);
        return Err(e);
      }
    };

    let summary = ReloadSummary {
      generation: number,
      records: generation.len(),
      dimension: generation.embeddings.dimension(),
      elapsed_ms: started.elapsed().as_millis() as u64,
    };

    self.ranker.cache().clear(number);
    *self.current.write().unwrap_or_else(|e| e.into_inner()) = Arc::new(generation);

    marquee::success!(
      "Reloaded generation {} with {} records in {}ms",
      summary.generation,
      summary.records,
      summary.elapsed_ms
    );
    Ok(summary)
  }

  pub fn generation_info(&self) -> GenerationInfo {
    self.current().info()
  }

  pub fn stats(&self) -> EngineStats {
    EngineStats {
      generation: self.generation_info(),
      cache: self.ranker.cache().stats(),
      default_top_k: self.default_top_k(),
    }
  }

  /// Record with `id` in the serving generation
  pub fn record(&self, id: i64) -> Option<Record> {
    self.current().records.iter().find(|record| record.id == id).cloned()
  }

  pub fn genres(&self) -> Vec<String> {
    self.current().features.genres()
  }

  pub fn countries(&self) -> Vec<String> {
    self.current().features.countries().to_vec()
  }

  pub fn categories(&self) -> Vec<String> {
    self.current().features.categories().to_vec()
  }
}
