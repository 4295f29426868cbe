use std::net::SocketAddr;

use axum::{
  RequestPartsExt,
  body::{Body, HttpBody},
  extract::{ConnectInfo, State},
  http::{Request, StatusCode},
  middleware::Next,
  response::Response,
};
use jiff::Timestamp;
use libplaystyle::prelude::*;
use opentelemetry::{global, trace::TraceContextExt};
use tokio::time::Instant;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::api::{AppState, config::Env, middlewares::RequestId};

pub async fn api_logger<P: CatalogProvider>(State(state): State<AppState<P>>, request: Request<Body>, next: Next) -> Result<Response, StatusCode> {
  let trace_id = Span::current().context().span().span_context().trace_id();

  let time = Timestamp::now().strftime("%Y-%m-%dT%H:%M:%S%z").to_string();
  let method = request.method().clone();
  let uri = request.uri().clone();
  let request_id = request.extensions().get::<RequestId>().map(|id| id.0.to_string()).unwrap_or_default();

  let (mut parts, body) = request.into_parts();
  let ip = if let Ok(ConnectInfo(addr)) = parts.extract::<ConnectInfo<SocketAddr>>().await {
    addr.ip().to_string()
  } else {
    "-".to_string()
  };

  let then = Instant::now();
  let response = next.run(Request::from_parts(parts, body)).await;

  global::meter("playstyle").f64_histogram("request_latency").build().record(then.elapsed().as_secs_f64() * 1000.0, &[]);

  let span = tracing::info_span!("request", %request_id, trace = %trace_id);
  let _guard = span.enter();

  let size = response.size_hint().exact().unwrap_or(0);

  match state.config.env {
    Env::Production => tracing::info!(
      time = time,
      remote = ip,
      method = %method,
      path = uri.path(),
      status = response.status().as_u16(),
      latency = then.elapsed().as_millis(),
      size,
      "request served"
    ),

    Env::Dev => tracing::info!(
      remote = ip,
      method = %method,
      path = uri.path(),
      status = response.status().as_u16(),
      latency = then.elapsed().as_millis(),
      size,
      "{} {}",
      method,
      uri,
    ),
  }

  Ok(response)
}
