//! Middleware for logging requests and responses.

use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::{request, response},
    middleware::Next,
    response::Response,
};

use crate::Error;

/// The number of bytes of a request or response body that are logged at the
/// `info` level. Longer bodies are truncated, the full body is logged at the
/// `debug` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// The largest request body the middleware will buffer, the same as axum's
/// default body limit.
const REQUEST_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the response body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and logged at the `debug` level.
///
/// The bodies are passed on byte for byte, only the logged text is decoded
/// lossily.
///
/// # Errors
/// Returns [Error::InvalidBody] if the request body cannot be read or is
/// larger than 2 MiB, and [Error::ServerError] if the response body cannot be
/// read.
pub async fn logging_middleware(request: Request, next: Next) -> Result<Response, Error> {
    let (parts, body) = request.into_parts();
    let body_bytes = to_bytes(body, REQUEST_BODY_LIMIT)
        .await
        .map_err(|error| Error::InvalidBody(format!("could not read request body: {error}")))?;
    log_request(&parts, &String::from_utf8_lossy(&body_bytes));

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|error| Error::ServerError(format!("could not read response body: {error}")))?;
    log_response(&parts, &String::from_utf8_lossy(&body_bytes));

    Ok(Response::from_parts(parts, Body::from(body_bytes)))
}

/// Shorten `body` to at most [LOG_BODY_LENGTH_LIMIT] characters.
fn truncate(body: &str) -> Option<String> {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        Some(body.chars().take(LOG_BODY_LENGTH_LIMIT).collect())
    } else {
        None
    }
}

fn log_request(parts: &request::Parts, body: &str) {
    match truncate(body) {
        Some(truncated) => {
            tracing::info!(
                "Received request: {} {}\nbody: {truncated}...",
                parts.method,
                parts.uri
            );
            tracing::debug!("Full request body: {body:?}");
        }
        None => tracing::info!(
            "Received request: {} {}\nbody: {body:?}",
            parts.method,
            parts.uri
        ),
    }
}

fn log_response(parts: &response::Parts, body: &str) {
    match truncate(body) {
        Some(truncated) => {
            tracing::info!("Sending response: {}\nbody: {truncated}...", parts.status);
            tracing::debug!("Full response body: {body:?}");
        }
        None => tracing::info!("Sending response: {}\nbody: {body:?}", parts.status),
    }
}
