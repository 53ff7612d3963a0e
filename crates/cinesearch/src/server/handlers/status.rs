//! Status endpoint handler

use axum::{extract::State, response::Json};
use uuid::Uuid;

use crate::server::types::{BaseResponse, StatusResponse};
use crate::server::AppState;

/// GET /status - Health check with the serving generation
pub async fn status(State(state): State<AppState>) -> Json<BaseResponse<StatusResponse>> {
  let transaction_id = Uuid::new_v4();
  let info = state.engine.generation_info();

  let response = StatusResponse {
    status: "healthy".to_string(),
    version: env!("CARGO_PKG_VERSION").to_string(),
    generation: info.number,
    records: info.records,
  };
  Json(BaseResponse::success(response, transaction_id))
}
