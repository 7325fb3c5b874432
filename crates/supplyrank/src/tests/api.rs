use axum::http::StatusCode;
use axum_test::TestServer;
use libsupplyrank::prelude::*;
use serde_json::{Value, json};

use crate::{
  api::{self, config::Config},
  tests::{empty_state, state_with},
};

fn server(config: Config) -> TestServer {
  TestServer::new(api::router(state_with(config)))
}

fn names(body: &Value) -> Vec<&str> {
  body.as_array().unwrap().iter().map(|item| item["supplier_name"].as_str().unwrap()).collect()
}

#[tokio::test]
async fn api_top_suppliers() {
  let server = server(Config::default());
  let response = server.get("/ss316-suppliers").await;

  assert_eq!(response.status_code(), StatusCode::OK);

  let body = response.json::<Value>();

  assert_eq!(
    names(&body),
    vec!["Allegheny Forge", "Maple Leaf Steel", "Keystone Alloys", "Great Lakes Tube", "Delaware Valley Metals"]
  );
  assert_eq!(body[0], json!({ "supplier_name": "Allegheny Forge" }));
}

#[tokio::test]
async fn api_top_suppliers_configured() {
  let server = server(Config {
    weighting: Weighting::Weighted,
    top_n: 2,
    ..Default::default()
  });

  let body = server.get("/ss316-suppliers").await.json::<Value>();

  assert_eq!(names(&body), vec!["Maple Leaf Steel", "Allegheny Forge"]);
}

#[tokio::test]
async fn api_recommend_similar() {
  let server = server(Config::default());

  let response = server
    .post("/recommend-suppliers")
    .json(&json!({
      "country": "usa",
      "financial_score": 80,
      "product_review_score": 80,
      "revenue": 600,
      "product_name": "ss316 PIPE",
    }))
    .await;

  assert_eq!(response.status_code(), StatusCode::OK);
  assert_eq!(
    names(&response.json::<Value>()),
    vec!["Great Lakes Tube", "Keystone Alloys", "Allegheny Forge", "Lone Star Fittings", "Buckeye Stainless"]
  );
}

#[tokio::test]
async fn api_recommend_by_criteria() {
  let server = server(Config {
    recommend_strategy: RecommendStrategy::Criteria,
    ..Default::default()
  });

  let payload = json!({
    "country": "USA",
    "financial_score": 76,
    "product_review_score": 0,
    "revenue": 0,
    "product_name": "SS316 Pipe",
  });

  let response = server.post("/recommend-suppliers").json(&payload).await;

  assert_eq!(response.status_code(), StatusCode::OK);
  assert_eq!(names(&response.json::<Value>()), vec!["Great Lakes Tube", "Keystone Alloys"]);

  let mut payload = payload;
  payload["financial_score"] = json!(99);

  let response = server.post("/recommend-suppliers").json(&payload).await;

  assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
  assert_eq!(response.json::<Value>(), json!({ "message": "no suppliers match the provided criteria" }));
}

#[tokio::test]
async fn api_recommend_unknown_product() {
  let server = server(Config::default());

  let response = server
    .post("/recommend-suppliers")
    .json(&json!({
      "country": "Mexico",
      "financial_score": 0,
      "product_review_score": 0,
      "revenue": 0,
      "product_name": "SS316 Pipe",
    }))
    .await;

  assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
  assert_eq!(response.json::<Value>(), json!({ "message": "no suppliers found for the specified country and product name" }));
}

#[tokio::test]
async fn api_recommend_by_location() {
  let server = server(Config::default());

  let payload = json!({
    "country": "USA",
    "state": "Pennsylvania",
    "financial_score": 70,
    "product_review_score": 0,
    "revenue": 0,
  });

  for path in ["/recommend_suppliers", "/recommend_suppliers/"] {
    let response = server.post(path).json(&payload).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(names(&response.json::<Value>()), vec!["Allegheny Forge", "Keystone Alloys", "Delaware Valley Metals"]);
  }

  let response = server
    .post("/recommend_suppliers/")
    .json(&json!({
      "country": "USA",
      "state": "Alaska",
      "financial_score": 0,
      "product_review_score": 0,
      "revenue": 0,
    }))
    .await;

  assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
  response.assert_text_contains("no suppliers match the provided criteria");
}

#[tokio::test]
async fn api_empty_table() {
  let server = TestServer::new(api::router(empty_state()));

  let response = server.get("/ss316-suppliers").await;

  assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(response.json::<Value>(), json!({ "message": "supplier data not loaded" }));

  assert_eq!(server.get("/healthz").await.status_code(), StatusCode::OK);
  assert_eq!(server.get("/readyz").await.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn api_probes() {
  let server = server(Config::default());

  assert_eq!(server.get("/healthz").await.status_code(), StatusCode::OK);
  assert_eq!(server.get("/readyz").await.status_code(), StatusCode::OK);
  assert_eq!(server.get("/metrics").await.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_invalid_payloads() {
  let server = server(Config::default());

  let response = server.post("/recommend-suppliers").await;

  assert_eq!(response.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

  let response = server.post("/recommend-suppliers").json(&json!({ "country": "USA" })).await;

  assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
  response.assert_text_contains("payload does not match expected format");

  let response = server
    .post("/recommend_suppliers/")
    .json(&json!({
      "country": "",
      "state": "Ohio",
      "financial_score": 0,
      "product_review_score": 0,
      "revenue": 0,
    }))
    .await;

  assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(
    response.json::<Value>(),
    json!({
      "message": "payload failed validation",
      "details": ["country: country must not be empty"],
    })
  );
}

#[tokio::test]
async fn api_unknown_route() {
  let server = server(Config::default());
  let response = server.get("/suppliers").await;

  assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
  assert_eq!(response.json::<Value>(), json!({ "message": "missing resource" }));
}
