use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{Result, SearchError};

/// Supplier of record vectors, in catalog order
pub trait EmbeddingSource: Send + Sync {
  /// Vectors for `expected` records
  fn load_embeddings(&self, expected: usize) -> Result<Vec<Vec<f32>>>;
}

/// Probes candidate JSON files (`[[f32, ..], ..]`) in order
///
/// The first readable file holding exactly `expected` vectors wins. Files
/// that are absent, unreadable, or of the wrong length are skipped.
pub struct FileEmbeddingSource {
  candidates: Vec<PathBuf>,
}

impl FileEmbeddingSource {
  pub fn new<I, P>(candidates: I) -> Self
  where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
  {
    Self { candidates: candidates.into_iter().map(|p| p.as_ref().to_path_buf()).collect() }
  }

  pub fn candidates(&self) -> &[PathBuf] {
    &self.candidates
  }
}

impl EmbeddingSource for FileEmbeddingSource {
  fn load_embeddings(&self, expected: usize) -> Result<Vec<Vec<f32>>> {
    let mut mismatch = None;

    for path in &self.candidates {
      if !path.is_file() {
        continue;
      }

      let vectors = match read_vectors(path) {
        Ok(vectors) => vectors,
        Err(e) => {
          marquee::warn!("Skipping embeddings at {}: {e}", path.display());
          continue;
        }
      };

      if vectors.len() != expected {
        marquee::warn!(
          "Embeddings at {} hold {} vectors, expected {expected}; skipping",
          path.display(),
          vectors.len()
        );
        mismatch = Some(vectors.len());
        continue;
      }

      marquee::verbose!("Loaded {} embeddings from {}", vectors.len(), path.display());
      return Ok(vectors);
    }

    match mismatch {
      Some(found) => Err(SearchError::DimensionMismatch { expected, found }),
      None => Err(SearchError::MissingSource { tried: self.candidates.clone() }),
    }
  }
}

fn read_vectors(path: &Path) -> std::result::Result<Vec<Vec<f32>>, String> {
  let content = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
  serde_json::from_str(&content).map_err(|e| e.to_string())
}

/// Vectors held in memory, replaceable between reloads
#[derive(Default)]
pub struct StaticEmbeddings {
  vectors: RwLock<Vec<Vec<f32>>>,
}

impl StaticEmbeddings {
  pub fn new(vectors: Vec<Vec<f32>>) -> Self {
    Self { vectors: RwLock::new(vectors) }
  }

  pub fn replace(&self, vectors: Vec<Vec<f32>>) {
    *self.vectors.write().unwrap_or_else(|e| e.into_inner()) = vectors;
  }
}

impl EmbeddingSource for StaticEmbeddings {
  fn load_embeddings(&self, expected: usize) -> Result<Vec<Vec<f32>>> {
    let vectors = self.vectors.read().unwrap_or_else(|e| e.into_inner()).clone();
    if vectors.len() != expected {
      return Err(SearchError::DimensionMismatch { expected, found: vectors.len() });
    }
    Ok(vectors)
  }
}
