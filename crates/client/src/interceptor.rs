//! Diagnostic request/response logging middleware.
//!
//! Responsibilities:
//! - Log every outgoing request (method, URL, HTTP version, headers, POST body).
//! - Log every response (elapsed time, status, headers, full body text).
//!
//! Does NOT handle:
//! - Log sink configuration (the embedding binary installs a subscriber).
//!
//! Invariants:
//! - The response body is buffered and handed back unchanged; the caller
//!   reads exactly the bytes the server sent, with the same status, version,
//!   headers and URL.
//! - Request and response content is never altered.
//! - Secret query values are masked in the logged URL only.
//! - Logging never fails a call. Only a body read failure propagates, as a
//!   transport failure.

use async_trait::async_trait;
use http::Extensions;
use http_body_util::BodyExt;
use reqwest::{Method, Request, Response, ResponseBuilderExt};
use reqwest_middleware::{Middleware, Next};
use std::borrow::Cow;
use std::time::Instant;
use tracing::debug;
use url::Url;

/// Query parameters whose values are masked in log output.
const MASKED_QUERY_KEYS: &[&str] = &["key", "secretKey"];

const MASK: &str = "****";

/// Middleware that records each request/response pair at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosticLogger;

#[async_trait]
impl Middleware for DiagnosticLogger {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let method = req.method().clone();
        let url = masked_url(req.url());

        debug!(
            method = %method,
            url = %url,
            version = ?req.version(),
            headers = ?req.headers(),
            "--> request"
        );
        if method == Method::POST {
            debug!(body = %describe_request_body(&req), "--> request body");
        }

        let started = Instant::now();
        let response = next.run(req, extensions).await.inspect_err(|e| {
            debug!(
                url = %url,
                elapsed_ms = started.elapsed().as_millis() as u64,
                error = %e,
                "<-- request failed"
            );
        })?;

        let status = response.status();
        let response_url = response.url().clone();
        let http_response: http::Response<reqwest::Body> = response.into();
        let (parts, body) = http_response.into_parts();
        let bytes = body
            .collect()
            .await
            .map_err(reqwest_middleware::Error::Reqwest)?
            .to_bytes();
        let elapsed_ms = started.elapsed().as_millis() as u64;

        debug!(
            url = %url,
            elapsed_ms,
            status = %status,
            headers = ?parts.headers,
            "<-- response"
        );
        debug!(body = %String::from_utf8_lossy(&bytes), "<-- response body");

        let mut rebuilt = http::Response::builder()
            .status(parts.status)
            .version(parts.version);
        if let Some(headers) = rebuilt.headers_mut() {
            *headers = parts.headers;
        }
        if let Some(extensions) = rebuilt.extensions_mut() {
            extensions.extend(parts.extensions);
        }
        let rebuilt = rebuilt
            .url(response_url)
            .body(bytes)
            .map_err(reqwest_middleware::Error::middleware)?;

        Ok(Response::from(rebuilt))
    }
}

fn describe_request_body(req: &Request) -> Cow<'_, str> {
    match req.body() {
        None => Cow::Borrowed("<empty>"),
        Some(body) => match body.as_bytes() {
            Some(bytes) => String::from_utf8_lossy(bytes),
            None => Cow::Borrowed("<streaming body>"),
        },
    }
}

/// Copy of `url` with secret query values replaced by a mask.
pub(crate) fn masked_url(url: &Url) -> Url {
    let has_secret = url
        .query_pairs()
        .any(|(k, _)| MASKED_QUERY_KEYS.contains(&k.as_ref()));
    if !has_secret {
        return url.clone();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if MASKED_QUERY_KEYS.contains(&k.as_ref()) {
                MASK.to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), value)
        })
        .collect();

    let mut masked = url.clone();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked
}
