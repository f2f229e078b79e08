//! HTTP request building.
//!
//! Every hop is requested with a browser-like header set so that sites serve
//! the same redirects a visitor would see. Caller-supplied overrides are
//! applied on top.

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_LENGTH};

use crate::error_handling::ValidationError;

/// Browser-like request headers applied to every hop.
///
/// `Accept-Encoding` is left to the transport: bodies are inspected as text and
/// the response's own `Content-Encoding` is reported untouched.
pub(crate) struct RequestHeaders;

impl RequestHeaders {
    /// Applies the standard request headers to a `reqwest::RequestBuilder`.
    pub(crate) fn apply_to_request_builder(
        builder: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        builder
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(
                reqwest::header::HeaderName::from_static("sec-fetch-dest"),
                "document",
            )
            .header(
                reqwest::header::HeaderName::from_static("sec-fetch-mode"),
                "navigate",
            )
            .header(
                reqwest::header::HeaderName::from_static("sec-fetch-site"),
                "none",
            )
            .header(reqwest::header::UPGRADE_INSECURE_REQUESTS, "1")
            .header(reqwest::header::CACHE_CONTROL, "max-age=0")
    }
}

/// Converts caller-supplied header overrides into a `HeaderMap`.
///
/// `Content-Length` is dropped since every hop is a body-less GET.
///
/// # Errors
///
/// Returns a [`ValidationError`] for names that are not valid HTTP tokens or
/// values that contain forbidden bytes.
pub fn build_header_overrides(
    overrides: &BTreeMap<String, String>,
) -> Result<HeaderMap, ValidationError> {
    let mut map = HeaderMap::new();
    for (name, value) in overrides {
        let header_name = HeaderName::from_bytes(name.trim().as_bytes())
            .map_err(|_| ValidationError::InvalidHeaderName(name.clone()))?;
        if header_name == CONTENT_LENGTH {
            continue;
        }
        let header_value = HeaderValue::from_str(value.trim())
            .map_err(|_| ValidationError::InvalidHeaderValue(name.clone()))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

/// Parses a CLI header argument of the form `Name: value`.
pub fn parse_header_arg(arg: &str) -> Result<(String, String), ValidationError> {
    let (name, value) = arg
        .split_once(':')
        .ok_or_else(|| ValidationError::MalformedHeader(arg.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MalformedHeader(arg.to_string()));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
