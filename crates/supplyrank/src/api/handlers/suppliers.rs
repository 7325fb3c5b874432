use axum::{Json, extract::State};
use libsupplyrank::prelude::*;
use tracing::instrument;

use crate::api::{
  AppState,
  dto::{LocationPayload, ProductPayload, SupplierName},
  errors::AppError,
  middlewares::json_rejection::TypedJson,
};

fn into_names(ranked: Vec<Ranked>) -> Json<Vec<SupplierName>> {
  Json(ranked.into_iter().map(SupplierName::from).collect())
}

#[instrument(skip_all)]
pub async fn top_suppliers(State(state): State<AppState>) -> Result<Json<Vec<SupplierName>>, AppError> {
  Ok(into_names(state.engine.top_suppliers()?))
}

#[instrument(skip_all)]
pub async fn recommend_suppliers(State(state): State<AppState>, TypedJson(body): TypedJson<ProductPayload>) -> Result<Json<Vec<SupplierName>>, AppError> {
  let query = ProductQuery::from(body);
  let ranked = state.engine.recommend(&query)?;

  tracing::debug!(strategy = %state.engine.config().recommend_strategy, country = %query.country, product = %query.product_name, results = ranked.len(), "recommended suppliers");

  Ok(into_names(ranked))
}

#[instrument(skip_all)]
pub async fn recommend_by_location(State(state): State<AppState>, TypedJson(body): TypedJson<LocationPayload>) -> Result<Json<Vec<SupplierName>>, AppError> {
  let query = LocationQuery::from(body);
  let ranked = state.engine.recommend_by_location(&query)?;

  tracing::debug!(country = %query.country, state = %query.state, results = ranked.len(), "recommended suppliers by location");

  Ok(into_names(ranked))
}
