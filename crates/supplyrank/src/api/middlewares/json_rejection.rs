use axum::{
  Json, RequestExt,
  body::Body,
  extract::{FromRequest, rejection::JsonRejection},
  http::{Request, StatusCode},
  response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::api::errors::ApiError;

/// JSON body extractor that also runs the payload's validation rules.
///
/// Malformed bodies are rejected before they reach the handlers, with an
/// [`ApiError`] describing what was wrong.
pub struct TypedJson<T>(pub T);

pub enum TypedJsonRejection {
  Json(JsonRejection),
  Validation(ValidationErrors),
}

impl From<&TypedJsonRejection> for ApiError {
  fn from(value: &TypedJsonRejection) -> Self {
    match value {
      TypedJsonRejection::Json(JsonRejection::JsonSyntaxError(_)) => ApiError(StatusCode::BAD_REQUEST, "invalid payload format".into(), None),
      TypedJsonRejection::Json(JsonRejection::JsonDataError(err)) => ApiError(StatusCode::BAD_REQUEST, "payload does not match expected format".into(), Some(vec![err.body_text()])),
      TypedJsonRejection::Json(JsonRejection::MissingJsonContentType(_)) => ApiError(StatusCode::UNSUPPORTED_MEDIA_TYPE, "invalid media type, expected application/json".into(), None),
      TypedJsonRejection::Json(err) => ApiError(StatusCode::BAD_REQUEST, "invalid payload".into(), Some(vec![err.body_text()])),
      TypedJsonRejection::Validation(errs) => ApiError(StatusCode::UNPROCESSABLE_ENTITY, "payload failed validation".into(), Some(validation_messages(errs))),
    }
  }
}

impl IntoResponse for TypedJsonRejection {
  fn into_response(self) -> Response {
    ApiError::from(&self).into_response()
  }
}

/// Flatten field errors into `field: message` strings, sorted by field name.
pub(crate) fn validation_messages(errs: &ValidationErrors) -> Vec<String> {
  let mut messages = errs
    .field_errors()
    .into_iter()
    .flat_map(|(field, errors)| {
      errors.iter().map(move |error| match &error.message {
        Some(message) => format!("{field}: {message}"),
        None => format!("{field}: {}", error.code),
      })
    })
    .collect::<Vec<_>>();

  messages.sort();
  messages
}

impl<T, S> FromRequest<S> for TypedJson<T>
where
  T: DeserializeOwned + Validate + 'static,
  S: Send + Sync,
{
  type Rejection = TypedJsonRejection;

  async fn from_request(request: Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
    let Json(payload) = request.extract::<Json<T>, _>().await.map_err(TypedJsonRejection::Json)?;

    payload.validate().map_err(TypedJsonRejection::Validation)?;

    Ok(TypedJson(payload))
  }
}
