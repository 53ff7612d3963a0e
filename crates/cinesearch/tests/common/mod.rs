#![allow(dead_code)]

use async_trait::async_trait;
use cinesearch::catalog::StaticCatalog;
use cinesearch::embedding::{QueryEncoder, StaticEmbeddings};
use cinesearch::{EngineBuilder, Record, SearchEngine, SearchError};
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixListener;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Encoder answering from a fixed table, falling back to a default vector
pub struct CountingEncoder {
  default: Vec<f32>,
  table: Mutex<HashMap<String, Vec<f32>>>,
  calls: AtomicUsize,
}

impl CountingEncoder {
  pub fn new(default: Vec<f32>) -> Self {
    Self { default, table: Mutex::new(HashMap::new()), calls: AtomicUsize::new(0) }
  }

  pub fn with(self, text: &str, vector: Vec<f32>) -> Self {
    self.table.lock().unwrap().insert(text.to_string(), vector);
    self
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl QueryEncoder for CountingEncoder {
  async fn encode(&self, text: &str) -> Result<Vec<f32>, SearchError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    if text.trim().is_empty() {
      return Err(SearchError::EncodingFailure("empty query".to_string()));
    }
    Ok(self.table.lock().unwrap().get(text).cloned().unwrap_or_else(|| self.default.clone()))
  }
}

pub struct Fixture {
  pub catalog: Arc<StaticCatalog>,
  pub embeddings: Arc<StaticEmbeddings>,
  pub encoder: Arc<CountingEncoder>,
  pub engine: SearchEngine,
}

impl Fixture {
  pub fn new(records: Vec<Record>, vectors: Vec<Vec<f32>>, encoder: CountingEncoder) -> Self {
    Self::with_capacity(records, vectors, encoder, 1000)
  }

  pub fn with_capacity(
    records: Vec<Record>,
    vectors: Vec<Vec<f32>>,
    encoder: CountingEncoder,
    capacity: usize,
  ) -> Self {
    let catalog = Arc::new(StaticCatalog::new(records));
    let embeddings = Arc::new(StaticEmbeddings::new(vectors));
    let encoder = Arc::new(encoder);

    let engine = EngineBuilder::new(catalog.clone(), embeddings.clone(), encoder.clone())
      .cache_capacity(capacity)
      .open()
      .expect("fixture engine opens");

    Self { catalog, embeddings, encoder, engine }
  }
}

/// A small mixed catalog with 2-dimensional vectors
pub fn movies() -> (Vec<Record>, Vec<Vec<f32>>) {
  let records = vec![
    Record::new(1, "Alien")
      .with_year(1979)
      .with_genres(["horror", "science fiction"])
      .with_countries(["USA", "UK"])
      .with_category("classics")
      .with_description("A crew meets a deadly creature in deep space."),
    Record::new(2, "Heat")
      .with_year(1995)
      .with_genres(["crime", "drama"])
      .with_countries(["USA"])
      .with_category("classics")
      .with_description("A detective hunts a master thief in Los Angeles."),
    Record::new(3, "Arrival")
      .with_year(2016)
      .with_genres(["drama", "science fiction"])
      .with_countries(["USA", "Canada"])
      .with_category("modern")
      .with_description("A linguist learns to talk with visitors from space."),
  ];
  let vectors = vec![vec![1.0, 0.2], vec![0.1, 1.0], vec![0.8, 0.6]];
  (records, vectors)
}

pub fn ids(hits: &[cinesearch::SearchHit]) -> Vec<i64> {
  hits.iter().map(|hit| hit.record.id).collect()
}

/// Catalog in the raw export layout: category name to raw movies
pub fn raw_catalog_json() -> serde_json::Value {
  serde_json::json!({
    "classics": [
      {
        "id": 1,
        "name": "Alien",
        "type": "movie",
        "year": 1979,
        "description": "A crew meets a deadly creature in deep space.",
        "rating": { "kp": 8.1 },
        "poster": { "url": "https://posters/1.jpg" },
        "genres": [{ "name": "Horror" }, { "name": "Science Fiction" }],
        "countries": [{ "name": "USA" }, { "name": "UK" }],
        "releaseYears": [{ "start": 1979 }]
      },
      {
        "id": 2,
        "name": "Heat",
        "year": 1995,
        "genres": [{ "name": "Crime" }, { "name": "Drama" }],
        "countries": [{ "name": "USA" }]
      }
    ],
    "modern": [
      {
        "id": 3,
        "name": "Arrival",
        "year": 2016,
        "genres": [{ "name": "Drama" }],
        "countries": [{ "name": "Canada" }],
        "isSeries": false
      },
      { "id": "broken", "name": "Skipped" }
    ]
  })
}

pub fn write_json(path: &Path, value: &impl serde::Serialize) {
  std::fs::write(path, serde_json::to_string(value).unwrap()).unwrap();
}

/// Serve `connections` encoder requests on a Unix socket, always answering `vector`
pub fn spawn_encoder_daemon(socket: &Path, vector: Vec<f32>, connections: usize) -> std::thread::JoinHandle<()> {
  let listener = UnixListener::bind(socket).unwrap();
  std::thread::spawn(move || {
    for stream in listener.incoming().take(connections) {
      let mut stream = stream.unwrap();
      let mut line = String::new();
      BufReader::new(&stream).read_line(&mut line).unwrap();

      let request: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
      let response = serde_json::json!({
        "embeddings": [vector.clone()],
        "id": request["id"],
        "error": null
      });
      writeln!(stream, "{response}").unwrap();
    }
  })
}
