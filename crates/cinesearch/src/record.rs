use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Year assumed for catalog entries that carry none
pub const DEFAULT_YEAR: i32 = 2000;

fn default_year() -> i32 {
  DEFAULT_YEAR
}

/// One immutable catalog entry
///
/// Absent fields take serde defaults: year 2000, empty strings and lists,
/// rating 0.0, `is_series` false. camelCase aliases accept documents written by
/// the catalog ingestion service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Record {
  pub id: i64,
  #[serde(default, alias = "name")]
  pub title: String,
  #[serde(default = "default_year")]
  pub year: i32,
  /// Lowercased genre names
  #[serde(default)]
  pub genres: Vec<String>,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub countries: Vec<String>,
  #[serde(default)]
  pub category: String,
  #[serde(default, alias = "isSeries")]
  pub is_series: bool,
  /// Catalog entry type such as "movie" or "tv-series"
  #[serde(default, alias = "type")]
  pub kind: String,
  #[serde(default, alias = "shortDescription")]
  pub short_description: String,
  #[serde(default)]
  pub status: String,
  #[serde(default)]
  pub rating: f64,
  #[serde(default, alias = "ageRating")]
  pub age_rating: Option<u32>,
  /// Poster URL
  #[serde(default)]
  pub poster: String,
  #[serde(default, alias = "releaseYear")]
  pub release_year: Option<i32>,
}

impl Record {
  pub fn new(id: i64, title: impl Into<String>) -> Self {
    Self {
      id,
      title: title.into(),
      year: DEFAULT_YEAR,
      genres: Vec::new(),
      description: String::new(),
      countries: Vec::new(),
      category: String::new(),
      is_series: false,
      kind: String::new(),
      short_description: String::new(),
      status: String::new(),
      rating: 0.0,
      age_rating: None,
      poster: String::new(),
      release_year: None,
    }
  }

  pub fn with_year(mut self, year: i32) -> Self {
    self.year = year;
    self
  }

  /// Replace the genre list; names are lowercased
  pub fn with_genres<I, S>(mut self, genres: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    self.genres = genres.into_iter().map(|g| g.as_ref().to_lowercase()).collect();
    self
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = description.into();
    self
  }

  pub fn with_countries<I, S>(mut self, countries: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.countries = countries.into_iter().map(Into::into).collect();
    self
  }

  pub fn with_category(mut self, category: impl Into<String>) -> Self {
    self.category = category.into();
    self
  }
}

/// A record with the relevance score it earned for one query
///
/// Serializes flat: every record field plus `relevance_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchHit {
  #[serde(flatten)]
  pub record: Record,
  pub relevance_score: f32,
}

impl SearchHit {
  pub fn new(record: Record, relevance_score: f32) -> Self {
    Self { record, relevance_score }
  }
}
