//! Search endpoint handler

use axum::{
  extract::{Extension, Query, State},
  response::Json,
};
use uuid::Uuid;

use crate::server::middleware::RequestContext;
use crate::server::types::{ApiError, BaseResponse, SearchParams, SearchResponse};
use crate::server::AppState;

/// GET /search - Ranked hits for a free-text query
///
/// Search failures never fail the request: the result list is empty and the
/// failure is reported in `errors`.
pub async fn search(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
  Query(params): Query<SearchParams>,
) -> Json<BaseResponse<SearchResponse>> {
  let transaction_id = Uuid::new_v4();
  let top_k = params.top_k.unwrap_or_else(|| state.engine.default_top_k());

  let outcome = state
    .engine
    .try_search(&params.query, top_k, params.year.as_deref(), params.genre.as_deref())
    .await;

  match outcome {
    Ok(results) => {
      context
        .log_info(&format!("Search '{}' returned {} hits", params.query, results.len()), "search-api")
        .await;
      let response = SearchResponse { query: params.query, total: results.len(), results };
      Json(BaseResponse::success(response, transaction_id))
    }
    Err(e) => {
      context.log_warn(&format!("Search '{}' failed: {e}", params.query), "search-api").await;
      let response = SearchResponse { query: params.query, total: 0, results: Vec::new() };
      Json(BaseResponse::partial(response, vec![ApiError::from(&e)], transaction_id))
    }
  }
}
