use std::error::Error;

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use libsupplyrank::prelude::*;
use serde_json::json;
use tracing::*;

pub(crate) struct ApiError(pub StatusCode, pub String, pub Option<Vec<String>>);

#[derive(Debug, thiserror::Error)]
pub enum AppError {
  #[error("missing resource")]
  ResourceNotFound,
  #[error("server error, please check your logs for more information")]
  ServerError,
  #[error(transparent)]
  OtherError(#[from] anyhow::Error),

  #[error("invalid configuration: {0}")]
  ConfigError(String),
  #[error("supplier data not loaded")]
  DataNotLoaded,
  #[error("{0}")]
  NoMatch(String),
}

impl From<SupplyRankError> for AppError {
  fn from(value: SupplyRankError) -> Self {
    match value {
      SupplyRankError::ConfigError(err) => AppError::ConfigError(err),
      SupplyRankError::EmptyTable => AppError::DataNotLoaded,
      err @ (SupplyRankError::NoSuppliersForProduct | SupplyRankError::NoSuppliersMatchCriteria) => AppError::NoMatch(err.to_string()),
      err => AppError::OtherError(err.into()),
    }
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let response = ApiError::from(&self);

    match response.0.is_server_error() {
      true => error!(error = self.source(), "{}", self.to_string()),
      false => debug!("{}", self.to_string()),
    }

    response.into_response()
  }
}

impl From<&AppError> for ApiError {
  fn from(value: &AppError) -> Self {
    match value {
      AppError::ResourceNotFound => ApiError(StatusCode::NOT_FOUND, value.to_string(), None),
      AppError::NoMatch(_) => ApiError(StatusCode::NOT_FOUND, value.to_string(), None),
      AppError::DataNotLoaded => ApiError(StatusCode::INTERNAL_SERVER_ERROR, value.to_string(), None),
      AppError::OtherError(inner) if inner.is::<AppError>() => match inner.downcast_ref::<AppError>() {
        Some(inner) => inner.into(),
        _ => ApiError(StatusCode::INTERNAL_SERVER_ERROR, value.to_string(), None),
      },
      _ => ApiError(StatusCode::INTERNAL_SERVER_ERROR, value.to_string(), None),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let payload = match self.2 {
      Some(details) => json!({
          "message": self.1.to_string(),
          "details": details,
      }),
      None => json!({
          "message": self.1.to_string(),
      }),
    };

    (self.0, Json(payload)).into_response()
  }
}
