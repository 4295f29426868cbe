use std::{
  sync::{Arc, Mutex},
  time::Duration,
};

use axum_test::TestServer;
use serde_json::json;

use crate::{
  api::{self, config::Config},
  tests::{log_writer::VecLogWriter, state},
  trace::{build_prometheus, init_tracing},
};

#[tokio::test]
async fn logging() {
  let buf = Arc::new(Mutex::new(Vec::default()));
  let config = Config::default();
  let _guard = init_tracing(&config, VecLogWriter::new(Arc::clone(&buf)));

  let server = TestServer::new(api::router(state(config))).unwrap();
  let _ = server.post("/recommendations").text("{}").await;

  let mut line = None;

  for _ in 0..50 {
    line = buf.lock().unwrap().iter().find(|line| line.contains(r#"path="/recommendations" status=415"#)).cloned();

    if line.is_some() {
      break;
    }

    tokio::time::sleep(Duration::from_millis(20)).await;
  }

  let line = line.expect("request was not logged");

  assert!(line.contains("POST http://localhost/recommendations"));
  assert!(line.contains("request_id="));
  assert!(line.contains(r#"remote="-" method=POST path="/recommendations" status=415"#));
}

#[tokio::test]
async fn metrics() {
  let state = api::AppState {
    config: Config {
      enable_prometheus: true,
      ..Default::default()
    },
    prometheus: Some(build_prometheus().unwrap()),
    ..state(Config::default())
  };

  let server = TestServer::new(api::router(state)).unwrap();

  let _ = server.post("/recommendations").text("{}").await;
  let _ = server.post("/recommendations").json(&json!({ "favorite_genres": "RPG" })).await;

  let response = server.get("/metrics").await;

  response.assert_status_ok();
  response.assert_text_contains(r#"http_requests_total{service="playstyle",status="415"}"#);
  response.assert_text_contains(r#"http_requests_total{service="playstyle",status="200"}"#);
  response.assert_text_contains("playstyle_recommendation_candidates_bucket");
}

#[tokio::test]
async fn request_id() {
  let server = TestServer::new(api::router(state(Config::default()))).unwrap();

  let response = server.get("/healthz").await;
  let generated = response.header("x-request-id");

  assert!(uuid::Uuid::parse_str(generated.to_str().unwrap()).is_ok());

  let response = server.get("/games/unknown").add_header("x-request-id", "0af76519-16cd-43dd-8448-eb211c80319c").await;

  assert_eq!(response.status_code(), 404);
  assert_eq!(response.header("x-request-id"), "0af76519-16cd-43dd-8448-eb211c80319c");

  let response = server.get("/healthz").add_header("x-request-id", "not-a-uuid").await;

  assert_ne!(response.header("x-request-id"), "not-a-uuid");
}
