use axum::{
  Router, middleware,
  routing::{get, post},
};
use libsupplyrank::prelude::*;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

use crate::{api::config::Config, trace};

pub mod config;
pub mod dto;
pub mod errors;

pub mod handlers;
mod middlewares;

#[derive(Clone)]
pub struct AppState {
  pub config: Config,
  pub prometheus: Option<PrometheusHandle>,
  pub engine: SupplyRank,
}

pub fn routes(config: &Config, engine: SupplyRank) -> anyhow::Result<Router> {
  let prometheus = match config.enable_prometheus {
    true => Some(trace::build_prometheus()?),
    false => None,
  };

  let state = AppState {
    config: config.clone(),
    prometheus,
    engine,
  };

  Ok(router(state))
}

pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/ss316-suppliers", get(handlers::top_suppliers))
    .route("/recommend-suppliers", post(handlers::recommend_suppliers))
    .route("/recommend_suppliers", post(handlers::recommend_by_location))
    .route("/recommend_suppliers/", post(handlers::recommend_by_location))
    .fallback(handlers::not_found)
    .layer(middleware::from_fn(middlewares::metrics))
    .layer(TraceLayer::new_for_http().make_span_with(middlewares::create_request_span))
    // The routes below will not go through the observability middlewares above
    .route("/healthz", get(handlers::healthz))
    .route("/readyz", get(handlers::readyz))
    .route("/metrics", get(handlers::prometheus))
    .layer(middleware::from_fn(middlewares::logging::api_logger))
    .layer(middleware::from_fn(middlewares::request_id))
    .with_state(state)
}
