//! Outbound fetching and redirect-chain resolution.
//!
//! The resolver never talks to the network directly. It drives a [`Fetcher`],
//! which performs exactly one request per call with automatic redirect
//! following disabled. [`HttpFetcher`] is the production implementation on top
//! of `reqwest`; tests substitute scripted fetchers.

pub mod classify;
pub mod headers;
pub mod redirects;
pub mod request;


use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::HeaderMap;
use url::Url;

use crate::config::MAX_RESPONSE_BODY_SIZE;
use crate::error_handling::FetchError;
use crate::models::TimingBreakdown;
use crate::tls::TransportTlsInfo;
use classify::should_read_body;
use request::RequestHeaders;

pub use redirects::resolve_redirect_chain;

/// One HTTP response as seen by the resolver.
#[derive(Debug, Clone, Default)]
pub struct FetchedResponse {
    pub status: u16,
    pub status_text: String,
    /// Raw header pairs in wire order; names may use any case.
    pub headers: Vec<(String, String)>,
    /// Body text, present only when it was read.
    pub body: Option<String>,
    pub tls: Option<TransportTlsInfo>,
    pub timing: TimingBreakdown,
    pub elapsed: Duration,
}

/// Performs a single request for `url` without following redirects.
///
/// Implementations read the body only when [`should_read_body`] allows it, so
/// redirect responses and body-less runs never download content.
pub trait Fetcher: Send + Sync {
    fn fetch(
        &self,
        url: &Url,
        include_body: bool,
    ) -> impl Future<Output = Result<FetchedResponse, FetchError>> + Send;
}

/// `reqwest`-backed fetcher.
///
/// The client must be built with `redirect::Policy::none()` (see
/// [`crate::initialization::init_redirect_client`]) and with TLS info enabled
/// for certificate details to be reported.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Arc<reqwest::Client>,
    overrides: HeaderMap,
}

impl HttpFetcher {
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self {
            client,
            overrides: HeaderMap::new(),
        }
    }

    /// Request headers applied after the browser defaults, replacing them by name.
    pub fn with_overrides(mut self, overrides: HeaderMap) -> Self {
        self.overrides = overrides;
        self
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url, include_body: bool) -> Result<FetchedResponse, FetchError> {
        let start = Instant::now();

        let builder = RequestHeaders::apply_to_request_builder(self.client.get(url.clone()))
            .headers(self.overrides.clone());
        let mut response = builder.send().await?;
        let ttfb = start.elapsed();

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let tls = response
            .extensions()
            .get::<reqwest::tls::TlsInfo>()
            .map(|info| TransportTlsInfo {
                peer_certificate_der: info.peer_certificate().map(<[u8]>::to_vec),
                ..TransportTlsInfo::default()
            });

        let (body, download) = if should_read_body(status.as_u16(), include_body) {
            let download_start = Instant::now();
            let body = read_body_capped(&mut response, url).await?;
            (Some(body), Some(download_start.elapsed()))
        } else {
            (None, None)
        };

        let elapsed = start.elapsed();
        Ok(FetchedResponse {
            status: status.as_u16(),
            status_text,
            headers,
            body,
            tls,
            timing: TimingBreakdown {
                ttfb: millis(ttfb),
                download: download.map(millis),
                total: millis(elapsed),
            },
            elapsed,
        })
    }
}

/// Reads the response body in chunks, stopping at `MAX_RESPONSE_BODY_SIZE`.
async fn read_body_capped(
    response: &mut reqwest::Response,
    url: &Url,
) -> Result<String, FetchError> {
    let mut buf: Vec<u8> = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let remaining = MAX_RESPONSE_BODY_SIZE.saturating_sub(buf.len());
        if chunk.len() > remaining {
            buf.extend_from_slice(&chunk[..remaining]);
            log::warn!(
                "Response body for {} exceeds {} bytes, truncating",
                url,
                MAX_RESPONSE_BODY_SIZE
            );
            break;
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
