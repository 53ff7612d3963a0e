//! REST server startup and configuration

use anyhow::Result;
use axum::serve;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::server::routing::create_router;
use crate::server::AppState;

const COMPONENT: &str = "cinesearch-server";

/// Serve the REST API on `addr` until the process stops
pub async fn start_server(addr: SocketAddr, state: AppState) -> Result<()> {
  let logs = state.logs.clone();
  logs.info(&format!("Starting cinesearch REST server on {addr}"), COMPONENT).await;

  let app = create_router(state)
    .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()));

  let listener = TcpListener::bind(addr).await?;
  logs.info(&format!("Server listening on {addr}"), COMPONENT).await;

  match serve(listener, app).await {
    Ok(()) => {
      logs.info("Server shutdown gracefully", COMPONENT).await;
      Ok(())
    }
    Err(e) => {
      logs.error(&format!("Server error: {e}"), COMPONENT).await;
      Err(anyhow::anyhow!("Server error: {e}"))
    }
  }
}
