//! Catalog sources
//!
//! The catalog is owned by an external store; the engine only needs a full,
//! ordered listing of records on startup and on reload.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{Result, SearchError};
use crate::record::{Record, DEFAULT_YEAR};

/// Supplier of the full ordered record listing
pub trait CatalogStore: Send + Sync {
  fn load_records(&self) -> Result<Vec<Record>>;
}

/// Catalog read from a JSON file on every load
///
/// Two layouts are accepted: a flat array of normalized records, or the raw
/// ingestion export, an object mapping each category name to its raw movies.
pub struct JsonCatalog {
  path: PathBuf,
}

impl JsonCatalog {
  pub fn new<P: AsRef<Path>>(path: P) -> Self {
    Self { path: path.as_ref().to_path_buf() }
  }
}

impl CatalogStore for JsonCatalog {
  fn load_records(&self) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(&self.path)
      .map_err(|e| SearchError::Catalog(format!("{}: {e}", self.path.display())))?;
    let document: Value = serde_json::from_str(&content)
      .map_err(|e| SearchError::Catalog(format!("{}: {e}", self.path.display())))?;

    let records = parse_catalog(document)?;
    marquee::verbose!("Read {} records from {}", records.len(), self.path.display());
    Ok(records)
  }
}

/// Turn a catalog document into an ordered, id-unique record list
pub fn parse_catalog(document: Value) -> Result<Vec<Record>> {
  let mut seen = HashSet::new();
  let mut records = Vec::new();

  match document {
    Value::Array(items) => {
      for item in items {
        match serde_json::from_value::<Record>(item) {
          Ok(mut record) if seen.insert(record.id) => {
            record.genres = record.genres.iter().map(|g| g.to_lowercase()).collect();
            records.push(record);
          }
          Ok(record) => marquee::warn!("Duplicate id {}, skipping", record.id),
          Err(e) => marquee::warn!("Skipping malformed record: {e}"),
        }
      }
    }
    Value::Object(categories) => {
      for (category, movies) in categories {
        let Value::Array(movies) = movies else {
          marquee::warn!("Category '{category}' is not a list, skipping");
          continue;
        };

        for movie in movies {
          if let Some(record) = normalize_raw_movie(&category, movie) {
            if seen.insert(record.id) {
              records.push(record);
            } else {
              marquee::warn!("Duplicate id {}, skipping", record.id);
            }
          }
        }
      }
    }
    _ => {
      return Err(SearchError::Catalog(
        "expected an array of records or an object of categories".to_string(),
      ))
    }
  }

  Ok(records)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawMovie {
  id: Value,
  name: Option<String>,
  #[serde(rename = "type")]
  kind: Option<String>,
  year: Option<i32>,
  description: Option<String>,
  short_description: Option<String>,
  status: Option<String>,
  rating: Option<RawRating>,
  age_rating: Option<u32>,
  poster: Option<RawPoster>,
  genres: Vec<Value>,
  countries: Vec<Value>,
  release_years: Vec<Value>,
  is_series: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRating {
  kp: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPoster {
  url: Option<String>,
}

/// Normalize one raw export entry; entries without an integer id are dropped
fn normalize_raw_movie(category: &str, movie: Value) -> Option<Record> {
  let raw: RawMovie = match serde_json::from_value(movie) {
    Ok(raw) => raw,
    Err(e) => {
      marquee::warn!("Skipping malformed movie in '{category}': {e}");
      return None;
    }
  };

  let Some(id) = raw.id.as_i64() else {
    marquee::warn!("Skipping movie without a valid id in '{category}'");
    return None;
  };

  let year = raw.year.unwrap_or(DEFAULT_YEAR);
  let release_year = raw
    .release_years
    .first()
    .and_then(|first| first.as_object())
    .map(|period| period.get("start").and_then(Value::as_i64).map(|start| start as i32))
    .unwrap_or(Some(year));

  Some(Record {
    id,
    title: raw.name.unwrap_or_default(),
    year,
    genres: named_values(&raw.genres).map(|g| g.to_lowercase()).collect(),
    description: raw.description.unwrap_or_default(),
    countries: named_values(&raw.countries).collect(),
    category: category.to_string(),
    is_series: raw.is_series.unwrap_or(false),
    kind: raw.kind.unwrap_or_default(),
    short_description: raw.short_description.unwrap_or_default(),
    status: raw.status.unwrap_or_default(),
    rating: raw.rating.and_then(|r| r.kp).unwrap_or(0.0),
    age_rating: raw.age_rating,
    poster: raw.poster.and_then(|p| p.url).unwrap_or_default(),
    release_year,
  })
}

/// `name` of every `{ "name": .. }` object in a list; other shapes are ignored
fn named_values(values: &[Value]) -> impl Iterator<Item = String> + '_ {
  values
    .iter()
    .filter_map(|v| v.as_object()?.get("name")?.as_str().map(str::to_string))
}

/// Catalog held in memory, replaceable between reloads
///
/// Suits callers that fetch records themselves and hand them to the engine.
#[derive(Default)]
pub struct StaticCatalog {
  records: RwLock<Vec<Record>>,
}

impl StaticCatalog {
  pub fn new(records: Vec<Record>) -> Self {
    Self { records: RwLock::new(records) }
  }

  /// Swap in a new listing; takes effect on the next engine reload
  pub fn replace(&self, records: Vec<Record>) {
    *self.records.write().unwrap_or_else(|e| e.into_inner()) = records;
  }
}

impl CatalogStore for StaticCatalog {
  fn load_records(&self) -> Result<Vec<Record>> {
    Ok(self.records.read().unwrap_or_else(|e| e.into_inner()).clone())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_raw_export_is_normalized() {
    let document = json!({
      "top250": [{
        "id": 301,
        "name": "Матрица",
        "type": "movie",
        "year": 1999,
        "description": "Хакер Нео",
        "rating": { "kp": 8.5 },
        "ageRating": 16,
        "poster": { "url": "https://img/301.jpg" },
        "genres": [{ "name": "Фантастика" }, { "name": "Боевик" }],
        "countries": [{ "name": "США" }],
        "releaseYears": [{ "start": 1999, "end": null }],
        "isSeries": false
      }]
    });

    let records = parse_catalog(document).unwrap();
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.id, 301);
    assert_eq!(record.title, "Матрица");
    assert_eq!(record.genres, vec!["фантастика", "боевик"]);
    assert_eq!(record.countries, vec!["США"]);
    assert_eq!(record.category, "top250");
    assert_eq!(record.rating, 8.5);
    assert_eq!(record.poster, "https://img/301.jpg");
    assert_eq!(record.release_year, Some(1999));
    assert_eq!(record.age_rating, Some(16));
  }

  #[test]
  fn test_invalid_ids_and_duplicates_are_skipped() {
    let document = json!({
      "a": [
        { "id": 1, "name": "First" },
        { "id": "2", "name": "String id" },
        { "name": "No id" },
        { "id": 1, "name": "Duplicate" }
      ],
      "b": [{ "id": 3, "name": "Third" }]
    });

    let records = parse_catalog(document).unwrap();
    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Third"]);
  }

  #[test]
  fn test_raw_defaults_for_missing_fields() {
    let document = json!({ "misc": [{ "id": 9, "poster": null, "rating": null }] });

    let records = parse_catalog(document).unwrap();
    let record = &records[0];
    assert_eq!(record.year, DEFAULT_YEAR);
    assert_eq!(record.release_year, Some(DEFAULT_YEAR));
    assert_eq!(record.poster, "");
    assert_eq!(record.rating, 0.0);
  }

  #[test]
  fn test_flat_array_of_records() {
    let document = json!([
      { "id": 1, "title": "One", "year": 1990, "genres": ["drama"] },
      { "id": 2, "title": "Two" }
    ]);

    let records = parse_catalog(document).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].year, DEFAULT_YEAR);
  }

  #[test]
  fn test_flat_array_genres_are_lowercased() {
    let document = json!([{ "id": 1, "title": "Heat", "genres": ["Crime", "DRAMA"] }]);

    let records = parse_catalog(document).unwrap();
    assert_eq!(records[0].genres, vec!["crime", "drama"]);
  }

  #[test]
  fn test_categories_keep_file_order() {
    let document: Value =
      serde_json::from_str(r#"{"top250": [{"id": 1}], "new": [{"id": 2}], "classics": [{"id": 3}]}"#)
        .unwrap();

    let records = parse_catalog(document).unwrap();
    let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let categories: Vec<&str> = records.iter().map(|r| r.category.as_str()).collect();
    assert_eq!(categories, vec!["top250", "new", "classics"]);
  }

  #[test]
  fn test_scalar_document_is_rejected() {
    let result = parse_catalog(json!(42));
    assert!(matches!(result, Err(SearchError::Catalog(_))));
  }

  #[test]
  fn test_static_catalog_replace() {
    let catalog = StaticCatalog::new(vec![Record::new(1, "a")]);
    catalog.replace(vec![Record::new(2, "b"), Record::new(3, "c")]);
    assert_eq!(catalog.load_records().unwrap().len(), 2);
  }
}
