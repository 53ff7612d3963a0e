//! Logs endpoint handler

use axum::{
  extract::{Query, State},
  http::StatusCode,
  response::Json,
};
use marquee::Level;
use uuid::Uuid;

use crate::server::handlers::ApiResult;
use crate::server::types::{ApiError, BaseResponse, LogsParams, LogsResponse};
use crate::server::AppState;

const DEFAULT_LIMIT: usize = 100;

/// GET /logs - Most recent event log entries, oldest first
pub async fn get_logs(State(state): State<AppState>, Query(params): Query<LogsParams>) -> ApiResult<LogsResponse> {
  let transaction_id = Uuid::new_v4();

  let level = match params.level.as_deref().map(str::parse::<Level>).transpose() {
    Ok(level) => level,
    Err(message) => {
      let error = ApiError::new("invalid_level", &message);
      return Err((StatusCode::BAD_REQUEST, Json(BaseResponse::<()>::error(vec![error], transaction_id))));
    }
  };

  let logs = state.logs.entries(Some(params.limit.unwrap_or(DEFAULT_LIMIT)), level).await;
  Ok(Json(BaseResponse::success(LogsResponse { logs }, transaction_id)))
}
