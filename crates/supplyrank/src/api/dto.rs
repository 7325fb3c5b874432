use libsupplyrank::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, Deserialize, Validate)]
pub(crate) struct ProductPayload {
  #[validate(length(min = 1, message = "country must not be empty"))]
  pub country: String,
  pub financial_score: f64,
  pub product_review_score: f64,
  pub revenue: f64,
  #[validate(length(min = 1, message = "product name must not be empty"))]
  pub product_name: String,
}

impl From<ProductPayload> for ProductQuery {
  fn from(payload: ProductPayload) -> Self {
    ProductQuery {
      country: payload.country,
      product_name: payload.product_name,
      profile: ScoreProfile {
        financial_score: payload.financial_score,
        review_score: payload.product_review_score,
        revenue: payload.revenue,
      },
    }
  }
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub(crate) struct LocationPayload {
  #[validate(length(min = 1, message = "country must not be empty"))]
  pub country: String,
  #[validate(length(min = 1, message = "state must not be empty"))]
  pub state: String,
  pub financial_score: f64,
  pub product_review_score: f64,
  pub revenue: f64,
}

impl From<LocationPayload> for LocationQuery {
  fn from(payload: LocationPayload) -> Self {
    LocationQuery {
      country: payload.country,
      state: payload.state,
      minimums: ScoreProfile {
        financial_score: payload.financial_score,
        review_score: payload.product_review_score,
        revenue: payload.revenue,
      },
    }
  }
}

#[derive(Debug, Serialize)]
pub(crate) struct SupplierName {
  pub supplier_name: String,
}

impl From<Ranked> for SupplierName {
  fn from(ranked: Ranked) -> Self {
    SupplierName { supplier_name: ranked.name }
  }
}
