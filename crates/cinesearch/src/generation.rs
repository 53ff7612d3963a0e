use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::embedding::EmbeddingMatrix;
use crate::error::Result;
use crate::features::FeatureIndex;
use crate::query::QueryAnalyzer;
use crate::record::Record;

/// One immutable, fully built snapshot of the searchable catalog
///
/// Records, vectors and features are built together and replaced together.
#[derive(Debug)]
pub struct Generation {
  pub number: u64,
  pub loaded_at: DateTime<Utc>,
  pub records: Vec<Record>,
  pub embeddings: EmbeddingMatrix,
  pub features: FeatureIndex,
  pub analyzer: QueryAnalyzer,
}

impl Generation {
  /// Validate and index a record listing with its vectors
  pub fn build(number: u64, records: Vec<Record>, vectors: Vec<Vec<f32>>) -> Result<Self> {
    let mut embeddings = EmbeddingMatrix::load(records.len(), vectors)?;
    embeddings.normalize();

    let features = FeatureIndex::build(&records);
    let analyzer = QueryAnalyzer::new(features.genres());

    Ok(Self { number, loaded_at: Utc::now(), records, embeddings, features, analyzer })
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  pub fn info(&self) -> GenerationInfo {
    GenerationInfo {
      number: self.number,
      loaded_at: self.loaded_at,
      records: self.records.len(),
      dimension: self.embeddings.dimension(),
      genres: self.features.genres().len(),
      year_range: self.features.year_range(),
    }
  }
}

/// Summary of the serving generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GenerationInfo {
  pub number: u64,
  pub loaded_at: DateTime<Utc>,
  pub records: usize,
  pub dimension: usize,
  pub genres: usize,
  pub year_range: Option<(i32, i32)>,
}
