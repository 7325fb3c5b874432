mod suppliers;

use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::api::{AppState, errors::AppError};

pub use self::suppliers::{recommend_by_location, recommend_suppliers, top_suppliers};

pub async fn not_found() -> impl IntoResponse {
  AppError::ResourceNotFound
}

pub async fn healthz() -> StatusCode {
  StatusCode::OK
}

pub async fn readyz(State(state): State<AppState>) -> StatusCode {
  match state.engine.is_ready() {
    true => StatusCode::OK,
    false => StatusCode::SERVICE_UNAVAILABLE,
  }
}

pub async fn prometheus(State(state): State<AppState>) -> Result<String, AppError> {
  match state.prometheus {
    Some(handle) => Ok(handle.render()),
    None => Err(AppError::ResourceNotFound),
  }
}
