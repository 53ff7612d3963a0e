//! Index maintenance handlers

use axum::{
  extract::{Extension, State},
  http::StatusCode,
  response::Json,
};
use uuid::Uuid;

use crate::server::handlers::ApiResult;
use crate::server::middleware::RequestContext;
use crate::server::types::{ApiError, BaseResponse, ReloadResponse, StatsResponse};
use crate::server::AppState;

/// POST /index/reload - Rebuild the generation from its sources
pub async fn reload(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
) -> ApiResult<ReloadResponse> {
  let transaction_id = Uuid::new_v4();
  context.log_info("Reloading index", "index-api").await;

  let engine = state.engine.clone();
  let error = match tokio::task::spawn_blocking(move || engine.reload()).await {
    Ok(Ok(summary)) => {
      context
        .log_success(
          &format!("Generation {} live with {} records", summary.generation, summary.records),
          "index-api",
        )
        .await;
      return Ok(Json(BaseResponse::success(summary, transaction_id)));
    }
    Ok(Err(e)) => ApiError::from(&e),
    Err(e) => ApiError::new("reload_aborted", &format!("Reload task failed: {e}")),
  };

  context.log_error(&format!("Reload failed: {}", error.message), "index-api").await;
  Err((StatusCode::INTERNAL_SERVER_ERROR, Json(BaseResponse::<()>::error(vec![error], transaction_id))))
}

/// GET /stats - Cache counters and the serving generation
pub async fn stats(State(state): State<AppState>) -> Json<BaseResponse<StatsResponse>> {
  Json(BaseResponse::success(state.engine.stats(), Uuid::new_v4()))
}
