use crate::error::{Result, SearchError};

/// Record vectors of one generation, aligned by index with its records
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingMatrix {
  vectors: Vec<Vec<f32>>,
  dimension: usize,
}

impl EmbeddingMatrix {
  /// Pair vectors with `record_count` records
  ///
  /// Fails when the counts differ or when the vectors are not all the same
  /// width.
  pub fn load(record_count: usize, vectors: Vec<Vec<f32>>) -> Result<Self> {
    if vectors.len() != record_count {
      return Err(SearchError::DimensionMismatch { expected: record_count, found: vectors.len() });
    }

    let dimension = vectors.first().map(Vec::len).unwrap_or(0);
    if let Some(odd) = vectors.iter().find(|v| v.len() != dimension) {
      return Err(SearchError::DimensionMismatch { expected: dimension, found: odd.len() });
    }

    Ok(Self { vectors, dimension })
  }

  /// Rescale every vector to unit length; zero vectors stay zero
  pub fn normalize(&mut self) {
    for vector in &mut self.vectors {
      normalize_in_place(vector);
    }
  }

  pub fn len(&self) -> usize {
    self.vectors.len()
  }

  pub fn is_empty(&self) -> bool {
    self.vectors.is_empty()
  }

  pub fn dimension(&self) -> usize {
    self.dimension
  }

  pub fn vector(&self, index: usize) -> Option<&[f32]> {
    self.vectors.get(index).map(Vec::as_slice)
  }

  pub fn iter(&self) -> impl Iterator<Item = &[f32]> {
    self.vectors.iter().map(Vec::as_slice)
  }
}

/// Scale a vector to unit L2 norm in place
pub fn normalize_in_place(vector: &mut [f32]) {
  let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
  if norm > 0.0 {
    for value in vector.iter_mut() {
      *value /= norm;
    }
  }
}

pub fn dot(a: &[f32], b: &[f32]) -> f32 {
  a.iter().zip(b).map(|(x, y)| x * y).sum()
}
