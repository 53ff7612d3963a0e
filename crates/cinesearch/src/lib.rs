//! Cinesearch - In-memory Semantic Movie Search
//!
//! Holds a catalog of movie records with precomputed embedding vectors and
//! answers free-text queries with a ranked top-K list that blends semantic
//! similarity, proximity to a year named in the query, and genre matches.

pub mod cache;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod engine;
pub mod error;
pub mod features;
pub mod generation;
pub mod query;
pub mod ranker;
pub mod record;
pub mod server;

pub use engine::{EngineBuilder, SearchEngine};
pub use error::{Result, SearchError};
pub use record::{Record, SearchHit};
