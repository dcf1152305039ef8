//! Request dispatch and envelope decoding shared by every endpoint.
//!
//! Invariants:
//! - A non-2xx status, 204/205, an empty body or a JSON `null` body all mean
//!   "no envelope" and yield `Ok(None)`.
//! - Transport failures propagate; they are never folded into `None`.
//! - No retries are attempted.

use reqwest::StatusCode;
use reqwest_middleware::RequestBuilder;
use tracing::debug;
use url::Url;

use crate::envelope::ResponseEnvelope;
use crate::error::{ClientError, Result};

/// Sends a request and decodes the response envelope, if any.
///
/// # Arguments
///
/// * `builder` - The prepared request
/// * `endpoint` - Route name used in log records and error messages
///
/// # Errors
///
/// Returns `ClientError::HttpError` on transport failure and
/// `ClientError::InvalidResponse` when a 2xx body is not an envelope.
pub async fn send_envelope_request(
    builder: RequestBuilder,
    endpoint: &str,
) -> Result<Option<ResponseEnvelope>> {
    let response = builder.send().await?;
    let status = response.status();

    if !status.is_success() {
        debug!(endpoint, status = status.as_u16(), "Non-success HTTP status, no envelope");
        return Ok(None);
    }
    if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
        debug!(endpoint, status = status.as_u16(), "No content, no envelope");
        return Ok(None);
    }

    let body = response.bytes().await?;
    if body.iter().all(u8::is_ascii_whitespace) {
        debug!(endpoint, "Empty body, no envelope");
        return Ok(None);
    }

    let envelope = serde_json::from_slice::<Option<ResponseEnvelope>>(&body).map_err(|e| {
        ClientError::InvalidResponse(format!("Failed to parse {endpoint} response: {e}"))
    })?;

    if let Some(envelope) = &envelope {
        debug!(endpoint, code = envelope.code, "Envelope received");
    }

    Ok(envelope)
}

/// Resolve a route relative to the base URL, keeping the base URL's path prefix.
pub(crate) fn endpoint_url(base_url: &str, route: &str) -> Result<Url> {
    let raw = format!("{}/{}", base_url.trim_end_matches('/'), route);
    Url::parse(&raw).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))
}

/// Resolve a route from the host root, discarding the base URL's path prefix.
pub(crate) fn root_url<'a>(
    base_url: &str,
    segments: impl IntoIterator<Item = &'a str>,
) -> Result<Url> {
    let mut url =
        Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|()| ClientError::InvalidUrl(format!("{base_url}: cannot be a base")))?
        .clear()
        .extend(segments);
    Ok(url)
}
