//! Request context and middleware for the cinesearch REST API
//!
//! Every request gets a [`RequestContext`] in its extensions carrying a
//! request id and the shared event log; start and completion are logged.

use axum::{
  extract::{Request, State},
  http::{HeaderMap, Method, Uri},
  middleware::Next,
  response::Response,
};
use marquee::{event_log::EventLog, Level};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::server::AppState;

const COMPONENT: &str = "http-request";

/// Request context containing the logger and request metadata
#[derive(Clone)]
pub struct RequestContext {
  pub request_id: Uuid,
  pub method: Method,
  pub uri: Uri,
  pub headers: HeaderMap,
  pub logs: Arc<EventLog>,
}

impl RequestContext {
  pub fn new(method: Method, uri: Uri, headers: HeaderMap, logs: Arc<EventLog>) -> Self {
    Self { request_id: Uuid::new_v4(), method, uri, headers, logs }
  }

  pub async fn log_info(&self, message: &str, component: &str) {
    self.log_with_context(Level::Info, message, component, None).await;
  }

  pub async fn log_success(&self, message: &str, component: &str) {
    self.log_with_context(Level::Success, message, component, None).await;
  }

  pub async fn log_warn(&self, message: &str, component: &str) {
    self.log_with_context(Level::Warn, message, component, None).await;
  }

  pub async fn log_error(&self, message: &str, component: &str) {
    self.log_with_context(Level::Error, message, component, None).await;
  }

  /// Record a message prefixed with the request id, method and path
  pub async fn log_with_context(
    &self,
    level: Level,
    message: &str,
    component: &str,
    outcome: Option<(u16, f64)>,
  ) {
    let user_agent =
      self.headers.get("user-agent").and_then(|v| v.to_str().ok()).unwrap_or("none");

    let line = match outcome {
      Some((status, duration_ms)) => format!(
        "[{}] {} {} - {} (Status: {}, Duration: {:.2}ms, User-Agent: {})",
        self.request_id,
        self.method,
        self.uri.path(),
        message,
        status,
        duration_ms,
        user_agent
      ),
      None => format!(
        "[{}] {} {} - {} (User-Agent: {})",
        self.request_id,
        self.method,
        self.uri.path(),
        message,
        user_agent
      ),
    };

    self.logs.record(level, &line, component).await;
  }

  pub async fn log_request_start(&self) {
    self.log_with_context(Level::Info, "Request started", COMPONENT, None).await;
  }

  pub async fn log_request_complete(&self, status_code: u16, duration_ms: f64) {
    let level = if status_code >= 500 { Level::Error } else { Level::Info };
    self
      .log_with_context(level, "Request completed", COMPONENT, Some((status_code, duration_ms)))
      .await;
  }
}

/// Middleware to inject a [`RequestContext`] into every request
pub async fn request_context_middleware(
  State(state): State<AppState>,
  mut request: Request,
  next: Next,
) -> Response {
  let context = RequestContext::new(
    request.method().clone(),
    request.uri().clone(),
    request.headers().clone(),
    state.logs.clone(),
  );

  let started = Instant::now();
  context.log_request_start().await;

  request.extensions_mut().insert(context.clone());
  let response = next.run(request).await;

  let duration_ms = started.elapsed().as_secs_f64() * 1000.0;
  context.log_request_complete(response.status().as_u16(), duration_ms).await;

  response
}
