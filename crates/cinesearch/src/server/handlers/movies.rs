//! Single record lookup

use axum::{
  extract::{Path, State},
  http::StatusCode,
  response::Json,
};
use uuid::Uuid;

use crate::server::handlers::ApiResult;
use crate::server::types::{ApiError, BaseResponse, MovieResponse};
use crate::server::AppState;

/// GET /movies/{id} - Record from the serving generation
pub async fn get_movie(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<MovieResponse> {
  let transaction_id = Uuid::new_v4();

  match state.engine.record(id) {
    Some(movie) => Ok(Json(BaseResponse::success(MovieResponse { movie }, transaction_id))),
    None => {
      let error = ApiError::new("movie_not_found", &format!("No movie with id {id}"));
      Err((StatusCode::NOT_FOUND, Json(BaseResponse::<()>::error(vec![error], transaction_id))))
    }
  }
}
