//! Query analysis: implicit year and genre hints, plus the clean text that
//! goes to the encoder.

use once_cell::sync::Lazy;
use regex::Regex;

/// First year of the fixed reference scale for year hints
pub const REFERENCE_MIN_YEAR: f32 = 1900.0;
/// Width of the reference scale (1900..=2025)
pub const REFERENCE_SPAN: f32 = 125.0;

static YEAR_PATTERN: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"\b(19\d{2}|20[0-2]\d)\b").expect("year pattern is valid"));

static YEAR_TOKEN: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"\b\d{4}\b").expect("year token pattern is valid"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Map a calendar year onto the reference scale
pub fn reference_scale(year: f32) -> f32 {
  (year - REFERENCE_MIN_YEAR) / REFERENCE_SPAN
}

/// Calendar year of a reference-scale value
pub fn reference_year(hint: f32) -> f32 {
  hint * REFERENCE_SPAN + REFERENCE_MIN_YEAR
}

/// Hints extracted from one query
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedQuery {
  /// Query with 4-digit tokens removed and whitespace collapsed
  pub clean_query: String,
  /// Year hint on the reference scale
  pub year_hint: Option<f32>,
  /// Lowercased genres, no duplicates
  pub genres: Vec<String>,
}

impl ParsedQuery {
  /// Merge explicit caller filters into the inferred hints
  ///
  /// A non-blank year filter replaces the inferred year; one that is not an
  /// integer clears it. A non-blank genre filter is lowercased and added.
  pub fn apply_filters(&mut self, year_filter: Option<&str>, genre_filter: Option<&str>) {
    if let Some(year) = year_filter.map(str::trim).filter(|y| !y.is_empty()) {
      self.year_hint = year.parse::<i32>().ok().map(|y| reference_scale(y as f32));
    }

    if let Some(genre) = genre_filter.map(str::trim).filter(|g| !g.is_empty()) {
      let genre = genre.to_lowercase();
      if !self.genres.contains(&genre) {
        self.genres.push(genre);
      }
    }
  }

  /// Calendar year the hint stands for
  pub fn hinted_year(&self) -> Option<f32> {
    self.year_hint.map(reference_year)
  }
}

/// Genre matchers compiled once per generation
#[derive(Debug, Clone)]
pub struct QueryAnalyzer {
  genres: Vec<(String, Regex)>,
}

impl QueryAnalyzer {
  pub fn new<I, S>(known_genres: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut genres: Vec<(String, Regex)> = Vec::new();
    for genre in known_genres {
      let genre = genre.as_ref().trim().to_lowercase();
      if genre.is_empty() || genres.iter().any(|(known, _)| *known == genre) {
        continue;
      }
      match Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&genre))) {
        Ok(matcher) => genres.push((genre, matcher)),
        Err(e) => marquee::warn!("Cannot match genre '{genre}': {e}"),
      }
    }

    Self { genres }
  }

  pub fn known_genres(&self) -> impl Iterator<Item = &str> {
    self.genres.iter().map(|(genre, _)| genre.as_str())
  }

  pub fn analyze(&self, query: &str) -> ParsedQuery {
    let year_hint = YEAR_PATTERN
      .captures(query)
      .and_then(|caps| caps[1].parse::<f32>().ok())
      .map(reference_scale);

    let stripped = YEAR_TOKEN.replace_all(query, "");
    let clean_query = WHITESPACE.replace_all(stripped.trim(), " ").into_owned();

    let genres = self
      .genres
      .iter()
      .filter(|(_, matcher)| matcher.is_match(query))
      .map(|(genre, _)| genre.clone())
      .collect();

    ParsedQuery { clean_query, year_hint, genres }
  }
}
