//! REST adapter over the search engine
//!
//! Thin axum layer: every handler calls straight into [`crate::SearchEngine`]
//! and wraps the outcome in a [`types::BaseResponse`] envelope.

pub mod handlers;
pub mod middleware;
pub mod routing;
pub mod startup;
pub mod types;

use marquee::event_log::EventLog;
use std::sync::Arc;

use crate::engine::SearchEngine;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
  pub engine: Arc<SearchEngine>,
  pub logs: Arc<EventLog>,
}

impl AppState {
  pub fn new(engine: Arc<SearchEngine>, logs: Arc<EventLog>) -> Self {
    Self { engine, logs }
  }
}
