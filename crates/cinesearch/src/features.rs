//! Per-generation structured features: normalized years, genre postings and
//! facet listings.

use std::collections::{BTreeMap, BTreeSet};

use crate::record::Record;

/// Value every record gets when all years in a generation are equal
pub const DEGENERATE_YEAR: f32 = 0.5;

#[derive(Debug, Clone, Default)]
pub struct FeatureIndex {
  normalized_years: Vec<f32>,
  year_range: Option<(i32, i32)>,
  genre_index: BTreeMap<String, Vec<usize>>,
  countries: Vec<String>,
  categories: Vec<String>,
}

impl FeatureIndex {
  pub fn build(records: &[Record]) -> Self {
    let year_range = records.iter().map(|r| r.year).fold(None, |range, year| match range {
      None => Some((year, year)),
      Some((min, max)) => Some((min.min(year), max.max(year))),
    });

    let mut index = Self { year_range, ..Self::default() };
    let normalized_years: Vec<f32> = records.iter().map(|r| index.normalize_year(r.year as f32)).collect();
    index.normalized_years = normalized_years;

    let mut countries = BTreeSet::new();
    let mut categories = BTreeSet::new();

    for (position, record) in records.iter().enumerate() {
      for genre in &record.genres {
        let postings = index.genre_index.entry(genre.to_lowercase()).or_default();
        if postings.last() != Some(&position) {
          postings.push(position);
        }
      }
      countries.extend(record.countries.iter().filter(|c| !c.is_empty()).cloned());
      if !record.category.is_empty() {
        categories.insert(record.category.clone());
      }
    }

    index.countries = countries.into_iter().collect();
    index.categories = categories.into_iter().collect();
    index
  }

  /// Min-max normalize a calendar year against this generation, clamped to [0, 1]
  pub fn normalize_year(&self, year: f32) -> f32 {
    match self.year_range {
      Some((min, max)) if max > min => ((year - min as f32) / (max - min) as f32).clamp(0.0, 1.0),
      _ => DEGENERATE_YEAR,
    }
  }

  pub fn normalized_year(&self, index: usize) -> Option<f32> {
    self.normalized_years.get(index).copied()
  }

  pub fn normalized_years(&self) -> &[f32] {
    &self.normalized_years
  }

  pub fn year_range(&self) -> Option<(i32, i32)> {
    self.year_range
  }

  /// Ascending record indices listing `genre`
  pub fn records_with_genre(&self, genre: &str) -> &[usize] {
    self.genre_index.get(&genre.to_lowercase()).map(Vec::as_slice).unwrap_or(&[])
  }

  /// Sorted distinct genres
  pub fn genres(&self) -> Vec<String> {
    self.genre_index.keys().cloned().collect()
  }

  pub fn countries(&self) -> &[String] {
    &self.countries
  }

  pub fn categories(&self) -> &[String] {
    &self.categories
  }
}
