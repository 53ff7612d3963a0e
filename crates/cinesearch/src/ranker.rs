//! Scoring and top-K selection over one generation
//!
//! Every record gets a combined score from three signals:
//!
//! - text: cosine similarity between the query vector and the record vector
//! - year: `1 - |record year - hinted year|`, both normalized to the
//!   generation's year range, 0 without a hint
//! - genre: `genre_boost` per hinted genre the record lists, uncapped
//!
//! The highest `top_k` are partitioned out, ordered, and anything at or below
//! the relevance floor is dropped.

use crate::cache::ResultCache;
use crate::config::RankingConfig;
use crate::embedding::{dot, normalize_in_place};
use crate::error::{Result, SearchError};
use crate::generation::Generation;
use crate::query::reference_year;
use crate::record::SearchHit;

#[derive(Debug)]
pub struct Ranker {
  config: RankingConfig,
  cache: ResultCache,
}

impl Ranker {
  pub fn new(config: RankingConfig, cache_capacity: usize) -> Self {
    Self { config, cache: ResultCache::new(cache_capacity) }
  }

  pub fn cache(&self) -> &ResultCache {
    &self.cache
  }

  /// Weighted sum of the three signals
  pub fn combine(&self, text: f32, year: f32, genre: f32) -> f32 {
    self.config.text_weight * text + self.config.year_weight * year + self.config.genre_weight * genre
  }

  /// Rank every record of `generation` against an encoded query
  ///
  /// `year_hint` is on the reference scale produced by the query analyzer.
  pub fn rank(
    &self,
    generation: &Generation,
    query_vector: &[f32],
    year_hint: Option<f32>,
    genres: &[String],
    top_k: usize,
  ) -> Result<Vec<SearchHit>> {
    if generation.is_empty() {
      return Err(SearchError::EmptyIndex);
    }

    let dimension = generation.embeddings.dimension();
    if query_vector.len() != dimension {
      return Err(SearchError::EncodingFailure(format!(
        "query vector has {} dimensions, index has {dimension}",
        query_vector.len()
      )));
    }

    if top_k == 0 {
      return Ok(Vec::new());
    }

    let mut query = query_vector.to_vec();
    normalize_in_place(&mut query);

    let year_target = year_hint.map(|hint| generation.features.normalize_year(reference_year(hint)));

    let mut genre_matches = vec![0u32; generation.len()];
    for genre in genres {
      for &index in generation.features.records_with_genre(genre) {
        genre_matches[index] += 1;
      }
    }

    let mut scored: Vec<(usize, f32)> = generation
      .embeddings
      .iter()
      .enumerate()
      .map(|(index, vector)| {
        let text = dot(&query, vector);
        let year = match (year_target, generation.features.normalized_year(index)) {
          (Some(target), Some(year)) => 1.0 - (year - target).abs(),
          _ => 0.0,
        };
        let genre = self.config.genre_boost * genre_matches[index] as f32;
        (index, self.combine(text, year, genre))
      })
      .collect();

    let by_score_desc = |a: &(usize, f32), b: &(usize, f32)| b.1.total_cmp(&a.1);

    let k = top_k.min(scored.len());
    if k < scored.len() {
      scored.select_nth_unstable_by(k - 1, by_score_desc);
      scored.truncate(k);
    }
    scored.sort_unstable_by(by_score_desc);

    Ok(
      scored
        .into_iter()
        .filter(|(_, score)| *score > self.config.relevance_floor)
        .map(|(index, score)| SearchHit::new(generation.records[index].clone(), score))
        .collect(),
    )
  }
}
