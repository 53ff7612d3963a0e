mod common;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

use common::{raw_catalog_json, spawn_encoder_daemon, write_json};

/// Write catalog, embeddings and a config file pointing at them
fn setup(dir: &TempDir) -> PathBuf {
  write_json(&dir.path().join("movies.json"), &raw_catalog_json());
  write_json(
    &dir.path().join("movies_embeddings.json"),
    &vec![vec![1.0_f32, 0.1], vec![0.1, 1.0], vec![0.7, 0.7]],
  );

  let config = format!(
    "catalog_path: {}\nembedding_paths:\n  - {}\nencoder_socket: {}\nencoder_timeout_ms: 2000\n",
    dir.path().join("movies.json").display(),
    dir.path().join("movies_embeddings.json").display(),
    socket_path(dir).display()
  );
  let config_path = dir.path().join("config.yaml");
  std::fs::write(&config_path, config).unwrap();
  config_path
}

fn socket_path(dir: &TempDir) -> PathBuf {
  dir.path().join("encoder.sock")
}

fn cinesearch_cmd(config: &Path) -> Command {
  let mut cmd = Command::cargo_bin("cinesearch").expect("binary exists");
  cmd
    .env("NO_COLOR", "1")
    .env_remove("CINESEARCH_CATALOG")
    .env_remove("CINESEARCH_EMBEDDINGS")
    .env_remove("CINESEARCH_ENCODER_SOCKET")
    .arg("--config")
    .arg(config);
  cmd
}

#[test]
fn test_genres_and_stats() {
  let temp = TempDir::new().unwrap();
  let config = setup(&temp);

  cinesearch_cmd(&config)
    .arg("genres")
    .assert()
    .success()
    .stdout(contains("crime").and(contains("science fiction")).and(contains("horror")));

  cinesearch_cmd(&config)
    .arg("stats")
    .assert()
    .success()
    .stdout(contains("Records: 3").and(contains("Years: 1979-2016")));
}

#[test]
fn test_show_movie() {
  let temp = TempDir::new().unwrap();
  let config = setup(&temp);

  cinesearch_cmd(&config)
    .args(["show", "1"])
    .assert()
    .success()
    .stdout(contains("\"title\": \"Alien\"").and(contains("https://posters/1.jpg")));

  cinesearch_cmd(&config).args(["show", "42"]).assert().failure().stderr(contains("No movie with id 42"));
}

#[test]
fn test_search_through_encoder_daemon() {
  let temp = TempDir::new().unwrap();
  let config = setup(&temp);
  let daemon = spawn_encoder_daemon(&socket_path(&temp), vec![0.0, 1.0], 1);

  cinesearch_cmd(&config)
    .args(["search", "crime", "story", "--top-k", "2", "--brief"])
    .assert()
    .success()
    .stdout(contains("Heat (1995) [crime, drama]"));

  daemon.join().unwrap();
}

#[test]
fn test_search_without_encoder_fails() {
  let temp = TempDir::new().unwrap();
  let config = setup(&temp);

  cinesearch_cmd(&config)
    .args(["search", "space"])
    .assert()
    .failure()
    .stderr(contains("Failed to encode query"));
}

#[test]
fn test_missing_embeddings_fail_to_load() {
  let temp = TempDir::new().unwrap();
  let config = setup(&temp);
  std::fs::remove_file(temp.path().join("movies_embeddings.json")).unwrap();

  cinesearch_cmd(&config)
    .arg("genres")
    .assert()
    .failure()
    .stderr(contains("No valid embedding source found"));
}
