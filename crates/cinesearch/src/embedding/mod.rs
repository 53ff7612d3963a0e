//! Record vectors and query encoding
//!
//! Vectors are precomputed outside this crate. [`EmbeddingSource`] supplies
//! the record vectors for a load, [`QueryEncoder`] turns one query into a
//! vector at search time, and [`EmbeddingMatrix`] holds the normalized record
//! vectors of one generation.

pub mod encoder;
pub mod source;
pub mod store;

pub use encoder::{DaemonEncoder, QueryEncoder};
pub use source::{EmbeddingSource, FileEmbeddingSource, StaticEmbeddings};
pub use store::{dot, normalize_in_place, EmbeddingMatrix};
