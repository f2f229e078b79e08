//! Inspection requests.

use std::collections::BTreeMap;

use reqwest::header::HeaderMap;
use serde::Deserialize;
use url::Url;

use super::url::validate_url;
use crate::error_handling::ValidationError;
use crate::fetch::request::build_header_overrides;

/// A request to inspect the redirect chain of `url`.
///
/// Deserializes from `{"url": "...", "headers": {...}, "includeBody": true}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub include_body: Option<bool>,
}

/// An [`InspectRequest`] that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    pub url: Url,
    /// Request headers replacing the browser defaults on every hop
    pub headers: HeaderMap,
    pub include_body: bool,
}

impl InspectRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Checks the URL and header overrides. `includeBody` defaults to true.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for a missing, malformed, overlong, or
    /// non-http(s) URL, or for header overrides that cannot be sent.
    pub fn validate(&self) -> Result<ValidatedRequest, ValidationError> {
        let url = validate_url(&self.url)?;
        let headers = match &self.headers {
            Some(headers) => build_header_overrides(headers)?,
            None => HeaderMap::new(),
        };

        Ok(ValidatedRequest {
            url,
            headers,
            include_body: self.include_body.unwrap_or(true),
        })
    }
}
