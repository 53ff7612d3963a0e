mod common;

use cinesearch::{Record, SearchError};
use common::{ids, movies, CountingEncoder, Fixture};
use std::sync::Arc;

#[tokio::test]
async fn test_year_named_in_query_ranks_that_year_first() {
  let records = vec![
    Record::new(1, "Nineties").with_year(1990),
    Record::new(2, "Millennium").with_year(2000),
    Record::new(3, "Tens").with_year(2010),
  ];
  let fixture = Fixture::new(records, vec![vec![1.0, 0.0]; 3], CountingEncoder::new(vec![1.0, 0.0]));

  let hits = fixture.engine.try_search("2000", 3, None, None).await.unwrap();

  assert_eq!(hits[0].record.id, 2);
  assert!(hits[0].relevance_score > hits[1].relevance_score);
  assert!((hits[1].relevance_score - hits[2].relevance_score).abs() < 1e-6);
}

#[tokio::test]
async fn test_equal_years_all_normalize_to_half() {
  let records = (1..=3).map(|id| Record::new(id, "same").with_year(2005)).collect();
  let fixture = Fixture::new(records, vec![vec![1.0, 0.0]; 3], CountingEncoder::new(vec![1.0, 0.0]));

  let generation = fixture.engine.current();
  assert_eq!(generation.features.normalized_years(), &[0.5, 0.5, 0.5]);
}

/// Same catalog with identical vectors, so only year and genre separate records
fn flat_fixture() -> Fixture {
  let (records, _) = movies();
  let count = records.len();
  Fixture::new(records, vec![vec![1.0, 0.0]; count], CountingEncoder::new(vec![1.0, 0.0]))
}

#[tokio::test]
async fn test_genre_hint_is_case_insensitive() {
  let fixture = flat_fixture();

  let lower = fixture.engine.try_search("crime story", 3, None, None).await.unwrap();
  let upper = fixture.engine.try_search("CRIME story", 3, None, None).await.unwrap();
  let plain = fixture.engine.try_search("story", 3, None, None).await.unwrap();

  assert_eq!(lower[0].record.id, 2);
  assert_eq!(ids(&lower), ids(&upper));
  assert_eq!(lower[0].relevance_score, upper[0].relevance_score);
  assert!((lower[0].relevance_score - plain[0].relevance_score - 0.01).abs() < 1e-5);
}

#[tokio::test]
async fn test_explicit_filters_shape_ranking() {
  let fixture = flat_fixture();

  let by_year = fixture.engine.try_search("space", 3, Some("2016"), None).await.unwrap();
  assert_eq!(ids(&by_year), vec![3, 2, 1]);

  let by_genre = fixture.engine.try_search("space", 3, None, Some("Crime")).await.unwrap();
  assert_eq!(by_genre[0].record.id, 2);
}

#[tokio::test]
async fn test_cache_hit_matches_miss_without_encoding_again() {
  let (records, vectors) = movies();
  let fixture = Fixture::new(records, vectors, CountingEncoder::new(vec![1.0, 0.5]));

  let miss = fixture.engine.try_search("space creature 1979", 2, None, None).await.unwrap();
  let hit = fixture.engine.try_search("space creature 1979", 2, None, None).await.unwrap();

  assert_eq!(fixture.encoder.calls(), 1);
  assert_eq!(serde_json::to_vec(&miss).unwrap(), serde_json::to_vec(&hit).unwrap());

  let stats = fixture.engine.stats();
  assert_eq!((stats.cache.hits, stats.cache.searches, stats.cache.entries), (1, 2, 1));
}

#[tokio::test]
async fn test_oldest_cached_query_is_evicted_first() {
  let (records, vectors) = movies();
  let fixture = Fixture::with_capacity(records, vectors, CountingEncoder::new(vec![1.0, 0.0]), 2);

  for query in ["first", "second", "third"] {
    fixture.engine.try_search(query, 3, None, None).await.unwrap();
  }
  assert_eq!(fixture.encoder.calls(), 3);

  fixture.engine.try_search("third", 3, None, None).await.unwrap();
  fixture.engine.try_search("second", 3, None, None).await.unwrap();
  assert_eq!(fixture.encoder.calls(), 3);

  fixture.engine.try_search("first", 3, None, None).await.unwrap();
  assert_eq!(fixture.encoder.calls(), 4);
}

#[tokio::test]
async fn test_empty_query_is_an_encoding_failure() {
  let (records, vectors) = movies();
  let fixture = Fixture::new(records, vectors, CountingEncoder::new(vec![1.0, 0.0]));

  let result = fixture.engine.try_search("", 5, None, None).await;
  assert!(matches!(result, Err(SearchError::EncodingFailure(_))));
  assert!(fixture.engine.search("   ", 5, None, None).await.is_empty());
  assert_eq!(fixture.encoder.calls(), 0);
}

#[tokio::test]
async fn test_empty_catalog_is_an_empty_index() {
  let fixture = Fixture::new(Vec::new(), Vec::new(), CountingEncoder::new(vec![1.0]));

  let result = fixture.engine.try_search("anything", 5, None, None).await;
  assert_eq!(result, Err(SearchError::EmptyIndex));
}

#[tokio::test]
async fn test_reload_is_idempotent_and_resets_cache() {
  let (records, vectors) = movies();
  let fixture = Fixture::new(records, vectors, CountingEncoder::new(vec![0.5, 0.5]));

  let before = fixture.engine.try_search("drama", 3, None, None).await.unwrap();

  let first = fixture.engine.reload().unwrap();
  let second = fixture.engine.reload().unwrap();
  assert_eq!((first.generation, second.generation), (2, 3));
  assert_eq!(first.records, second.records);

  let stats = fixture.engine.stats();
  assert_eq!((stats.cache.hits, stats.cache.searches, stats.cache.entries), (0, 0, 0));

  let after = fixture.engine.try_search("drama", 3, None, None).await.unwrap();
  assert_eq!(before, after);
  assert_eq!(fixture.encoder.calls(), 2);
}

#[tokio::test]
async fn test_reload_with_mismatched_embeddings_keeps_old_generation() {
  let (records, vectors) = movies();
  let fixture = Fixture::new(records.clone(), vectors, CountingEncoder::new(vec![1.0, 1.0]));

  let mut grown = records;
  grown.push(Record::new(4, "Extra").with_year(2020));
  fixture.catalog.replace(grown);

  let result = fixture.engine.reload();
  assert_eq!(result, Err(SearchError::DimensionMismatch { expected: 4, found: 3 }));

  let info = fixture.engine.generation_info();
  assert_eq!((info.number, info.records), (1, 3));
  assert_eq!(fixture.engine.try_search("space", 5, None, None).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_reload_picks_up_new_records() {
  let (records, mut vectors) = movies();
  let fixture = Fixture::new(records.clone(), vectors.clone(), CountingEncoder::new(vec![0.0, 1.0]));

  let mut grown = records;
  grown.push(Record::new(4, "Ronin").with_year(1998).with_genres(["crime", "thriller"]));
  vectors.push(vec![0.0, 1.0]);
  fixture.catalog.replace(grown);
  fixture.embeddings.replace(vectors);

  let summary = fixture.engine.reload().unwrap();
  assert_eq!(summary.records, 4);
  assert!(fixture.engine.genres().contains(&"thriller".to_string()));

  let hits = fixture.engine.try_search("thriller", 1, None, None).await.unwrap();
  assert_eq!(ids(&hits), vec![4]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_searches_during_reload_see_whole_generations() {
  let (records, vectors) = movies();
  let fixture = Arc::new(Fixture::new(records, vectors, CountingEncoder::new(vec![1.0, 1.0])));

  let mut tasks = Vec::new();
  for worker in 0..8 {
    let fixture = fixture.clone();
    tasks.push(tokio::spawn(async move {
      for round in 0..20 {
        let query = format!("query {worker} {round}");
        let hits = fixture.engine.try_search(&query, 3, None, None).await.unwrap();
        assert_eq!(hits.len(), 3);
      }
    }));
  }

  let reloader = fixture.clone();
  let reloads = tokio::task::spawn_blocking(move || {
    for _ in 0..10 {
      reloader.engine.reload().unwrap();
    }
  });

  for task in tasks {
    task.await.unwrap();
  }
  reloads.await.unwrap();
  assert_eq!(fixture.engine.generation_info().number, 11);
}
