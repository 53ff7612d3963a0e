pub mod facets;
pub mod index;
pub mod logs;
pub mod movies;
pub mod search;
pub mod status;

use axum::{http::StatusCode, response::Json};

use crate::server::types::BaseResponse;

/// Handler result: an enveloped payload, or a status with an error envelope
pub type ApiResult<T> = Result<Json<BaseResponse<T>>, (StatusCode, Json<BaseResponse<()>>)>;
