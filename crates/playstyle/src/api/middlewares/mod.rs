use axum::{
  body::Body,
  http::{HeaderMap, HeaderValue, Request, StatusCode},
  middleware::Next,
  response::Response,
};
use metrics::counter;
use opentelemetry::global;
use opentelemetry_http::HeaderExtractor;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;
use uuid::Uuid;

pub(crate) mod json_rejection;
pub(crate) mod logging;

pub(crate) const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone, Debug)]
pub(crate) struct RequestId(pub Uuid);

impl RequestId {
  // Reuse the caller's identifier when it is a valid UUID.
  fn from_headers(headers: &HeaderMap) -> RequestId {
    let id = headers
      .get(REQUEST_ID_HEADER)
      .and_then(|value| value.to_str().ok())
      .and_then(|value| Uuid::parse_str(value.trim()).ok())
      .unwrap_or_else(Uuid::new_v4);

    RequestId(id)
  }
}

pub(crate) async fn request_id(mut request: Request<Body>, next: Next) -> Result<Response, StatusCode> {
  let request_id = RequestId::from_headers(request.headers());

  request.extensions_mut().insert(request_id.clone());

  let mut response = next.run(request).await;

  if let Ok(value) = HeaderValue::from_str(&request_id.0.to_string()) {
    response.headers_mut().insert(REQUEST_ID_HEADER, value);
  }

  response.extensions_mut().insert::<RequestId>(request_id);

  Ok(response)
}

pub(super) async fn metrics(request: Request<Body>, next: Next) -> Result<Response, StatusCode> {
  let response = next.run(request).await;

  counter!("http_requests_total", "status" => response.status().as_u16().to_string()).increment(1);

  Ok(response)
}

pub(crate) fn create_request_span(req: &axum::extract::Request) -> Span {
  let parent = global::get_text_map_propagator(|propagator| propagator.extract(&HeaderExtractor(req.headers())));
  let request_id = req.extensions().get::<RequestId>().map(|id| id.0.to_string()).unwrap_or_default();
  let span = tracing::info_span!("request", request_id = %request_id);

  let _ = span.set_parent(parent);
  span
}
