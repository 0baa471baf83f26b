//! axum adapter for the waitlist handler

use crate::waitlist::handler::{handle_waitlist, WaitlistResponse, WaitlistSink};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};
use chrono::Utc;
use std::sync::Arc;

/// Route the endpoint is served under
pub const WAITLIST_ROUTE: &str = "/api/waitlist";

pub type SharedSink = Arc<dyn WaitlistSink>;

pub fn waitlist_router(sink: SharedSink) -> Router {
    Router::new()
        .route(WAITLIST_ROUTE, any(waitlist))
        .with_state(sink)
}

async fn waitlist(
    State(sink): State<SharedSink>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let forwarded_for = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok());
    let response = handle_waitlist(method.as_str(), &body, forwarded_for, sink.as_ref(), Utc::now());
    tracing::debug!(method = %method, status = response.status, "waitlist request");
    into_http(response)
}

fn into_http(response: WaitlistResponse) -> Response {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut headers = HeaderMap::new();
    for (name, value) in response.headers {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }
    match response.body {
        Some(body) => (status, headers, Json(body)).into_response(),
        None => (status, headers).into_response(),
    }
}
