use anyhow::{Context, Result};
use colored::*;
use std::path::Path;

use crate::cli::display::{display_search_hit, hit_headline};
use crate::config::EngineConfig;
use crate::engine::SearchEngine;

fn open_engine(config_path: Option<&Path>) -> Result<SearchEngine> {
  let config = EngineConfig::load_with(config_path)?;
  SearchEngine::from_config(&config).context("Failed to load the search index")
}

/// Run one query against the configured index and print the ranked hits
pub async fn search(
  config_path: Option<&Path>,
  terms: &[String],
  top_k: Option<usize>,
  year: Option<&str>,
  genre: Option<&str>,
  brief: bool,
) -> Result<()> {
  let engine = open_engine(config_path)?;
  let query = terms.join(" ");
  let top_k = top_k.unwrap_or_else(|| engine.default_top_k());

  let hits = engine.try_search(&query, top_k, year, genre).await?;

  if hits.is_empty() {
    println!("No results for {}", query.yellow());
    return Ok(());
  }

  for (rank, hit) in hits.iter().enumerate() {
    if brief {
      println!("{:.3}  {}", hit.relevance_score, hit_headline(hit));
    } else {
      display_search_hit(rank + 1, hit);
    }
  }
  Ok(())
}

/// Print one facet listing, one value per line
pub fn list_facet(config_path: Option<&Path>, facet: Facet) -> Result<()> {
  let engine = open_engine(config_path)?;
  let values = match facet {
    Facet::Genres => engine.genres(),
    Facet::Countries => engine.countries(),
    Facet::Categories => engine.categories(),
  };

  for value in values {
    println!("{value}");
  }
  Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
  Genres,
  Countries,
  Categories,
}

/// Print one record of the index
pub fn show(config_path: Option<&Path>, id: i64) -> Result<()> {
  let engine = open_engine(config_path)?;
  let record = engine.record(id).with_context(|| format!("No movie with id {id}"))?;

  println!("{}", serde_json::to_string_pretty(&record)?);
  Ok(())
}

/// Summarize the index that the configuration points at
pub fn stats(config_path: Option<&Path>) -> Result<()> {
  let engine = open_engine(config_path)?;
  let info = engine.generation_info();

  println!("{} {}", "Records:".bold(), info.records);
  println!("{} {}", "Dimensions:".bold(), info.dimension);
  println!("{} {}", "Genres:".bold(), info.genres);
  if let Some((min, max)) = info.year_range {
    println!("{} {min}-{max}", "Years:".bold());
  }
  println!("{} {}", "Countries:".bold(), engine.countries().len());
  println!("{} {}", "Categories:".bold(), engine.categories().len());
  Ok(())
}
