//! Bounded memo of ranked result lists
//!
//! Entries are keyed by the raw request (query text, explicit filters and
//! result count), so the analyzer and the encoder are skipped entirely on a
//! hit. Eviction is FIFO by insertion order. The cache belongs to exactly one
//! generation at a time; results computed against any other are refused.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::record::SearchHit;

/// Ranked hits shared between the cache and its readers
pub type CachedHits = Arc<[SearchHit]>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
  pub query: String,
  pub year_filter: Option<String>,
  pub genre_filter: Option<String>,
  pub top_k: usize,
}

impl CacheKey {
  pub fn new(query: &str, year_filter: Option<&str>, genre_filter: Option<&str>, top_k: usize) -> Self {
    Self {
      query: query.to_string(),
      year_filter: year_filter.map(str::to_string),
      genre_filter: genre_filter.map(str::to_string),
      top_k,
    }
  }
}

/// Snapshot of cache counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CacheStats {
  pub hits: u64,
  pub searches: u64,
  pub entries: usize,
  pub capacity: usize,
  /// `hits / searches`, 0 before the first search
  pub hit_rate: f64,
}

#[derive(Debug, Default)]
struct CacheState {
  generation: u64,
  entries: HashMap<CacheKey, CachedHits>,
  order: VecDeque<CacheKey>,
}

#[derive(Debug)]
pub struct ResultCache {
  capacity: usize,
  state: Mutex<CacheState>,
  hits: AtomicU64,
  searches: AtomicU64,
}

impl ResultCache {
  pub fn new(capacity: usize) -> Self {
    Self {
      capacity,
      state: Mutex::new(CacheState::default()),
      hits: AtomicU64::new(0),
      searches: AtomicU64::new(0),
    }
  }

  fn state(&self) -> MutexGuard<'_, CacheState> {
    self.state.lock().unwrap_or_else(|e| e.into_inner())
  }

  /// Look up a key on behalf of a search, counting the search and any hit
  pub fn lookup(&self, key: &CacheKey) -> Option<CachedHits> {
    self.searches.fetch_add(1, Ordering::Relaxed);
    let found = self.get(key);
    if found.is_some() {
      self.hits.fetch_add(1, Ordering::Relaxed);
    }
    found
  }

  /// Uncounted lookup
  pub fn get(&self, key: &CacheKey) -> Option<CachedHits> {
    self.state().entries.get(key).cloned()
  }

  /// Insert hits computed against `generation`
  ///
  /// Returns false when the insert is refused: the cache is disabled, the
  /// generation is not the current one, or the key is already present.
  pub fn put(&self, key: CacheKey, generation: u64, hits: CachedHits) -> bool {
    if self.capacity == 0 {
      return false;
    }

    let mut state = self.state();
    if state.generation != generation || state.entries.contains_key(&key) {
      return false;
    }

    while state.order.len() >= self.capacity {
      match state.order.pop_front() {
        Some(oldest) => {
          state.entries.remove(&oldest);
        }
        None => break,
      }
    }

    state.order.push_back(key.clone());
    state.entries.insert(key, hits);
    true
  }

  /// Drop every entry and reset counters; the cache now belongs to `generation`
  pub fn clear(&self, generation: u64) {
    let mut state = self.state();
    state.generation = generation;
    state.entries.clear();
    state.order.clear();
    self.hits.store(0, Ordering::Relaxed);
    self.searches.store(0, Ordering::Relaxed);
  }

  pub fn generation(&self) -> u64 {
    self.state().generation
  }

  pub fn len(&self) -> usize {
    self.state().entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn capacity(&self) -> usize {
    self.capacity
  }

  pub fn stats(&self) -> CacheStats {
    let hits = self.hits.load(Ordering::Relaxed);
    let searches = self.searches.load(Ordering::Relaxed);
    CacheStats {
      hits,
      searches,
      entries: self.len(),
      capacity: self.capacity,
      hit_rate: if searches == 0 { 0.0 } else { hits as f64 / searches as f64 },
    }
  }
}
