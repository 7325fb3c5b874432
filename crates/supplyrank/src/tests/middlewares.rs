use std::sync::{Arc, Mutex};

use axum_test::TestServer;

use crate::{
  api::{self, AppState, config::Config},
  tests::{log_writer::VecLogWriter, state_with},
  trace::{build_prometheus, init_tracing},
};

#[tokio::test]
async fn logging() {
  let lines = Arc::new(Mutex::new(Vec::default()));
  let state = state_with(Config::default());
  let guards = init_tracing(&state.config, VecLogWriter::new(Arc::clone(&lines)));

  let server = TestServer::new(api::router(state));
  let response = server.get("/ss316-suppliers").add_header("traceparent", "00-0af7651916cd43dd8448eb211c80319c-b7ad6b7169203331-01").await;

  assert!(response.headers().contains_key("x-request-id"));

  drop(guards);

  let lines = lines.lock().unwrap();
  let line = lines.iter().find(|line| line.contains("GET http://localhost/ss316-suppliers")).unwrap();

  assert!(line.contains("request_id="));
  assert!(line.contains("trace_id=0af7651916cd43dd8448eb211c80319c"));
  assert!(line.contains(r#"remote="-" method=GET path="/ss316-suppliers" status=200"#));
}

#[tokio::test]
async fn metrics() {
  let base = state_with(Config {
    enable_prometheus: true,
    ..Default::default()
  });

  let state = AppState {
    prometheus: Some(build_prometheus().unwrap()),
    ..base
  };

  let server = TestServer::new(api::router(state));
  let _ = server.get("/ss316-suppliers").await;
  let body = server.get("/metrics").await.text();

  assert!(body.contains("http_requests_total{"));
  assert!(body.contains(r#"path="/ss316-suppliers""#));
  assert!(body.contains("supplyrank_scoring_latency_seconds_bucket"));
  assert!(body.contains("supplyrank_candidates_bucket"));
  assert!(!body.contains("supplyrank_candidates_total"));
}
