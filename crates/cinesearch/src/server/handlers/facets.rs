//! Distinct value listings of the serving generation

use axum::{extract::State, response::Json};
use uuid::Uuid;

use crate::server::types::{BaseResponse, FacetResponse};
use crate::server::AppState;

fn facet(values: Vec<String>) -> Json<BaseResponse<FacetResponse>> {
  Json(BaseResponse::success(FacetResponse { values }, Uuid::new_v4()))
}

/// GET /genres
pub async fn genres(State(state): State<AppState>) -> Json<BaseResponse<FacetResponse>> {
  facet(state.engine.genres())
}

/// GET /countries
pub async fn countries(State(state): State<AppState>) -> Json<BaseResponse<FacetResponse>> {
  facet(state.engine.countries())
}

/// GET /categories
pub async fn categories(State(state): State<AppState>) -> Json<BaseResponse<FacetResponse>> {
  facet(state.engine.categories())
}
