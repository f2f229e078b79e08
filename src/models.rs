//! Hop and chain records produced by the resolver.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Serialize, Serializer};
use strum_macros::{Display, EnumString};
use url::Url;

use crate::config::{FETCH_FAILED_STATUS_TEXT, LOOP_DETECTED_STATUS_TEXT};
use crate::fingerprint::ServerInfo;
use crate::security::SecurityAnalysis;
use crate::seo::SeoAnalysis;
use crate::tls::TlsSummary;

/// Mechanism by which a hop pointed to its successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RedirectType {
    /// 3xx status with a `Location` header
    Http,
    /// `<meta http-equiv="refresh">` in the body
    MetaRefresh,
    /// `window.location`-style assignment in the body
    Javascript,
    /// No redirect indicated
    None,
}

/// Per-hop timing in milliseconds.
///
/// reqwest does not expose DNS/TCP/TLS phases, so only time-to-first-byte,
/// body download, and total are recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub ttfb: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download: Option<u64>,
    pub total: u64,
}

/// One fetch attempt in a redirect chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hop {
    pub url: String,
    pub host: String,
    /// HTTP status, or 0 for synthetic loop/failure hops
    pub status: u16,
    pub status_text: String,
    #[serde(serialize_with = "serialize_duration")]
    pub duration: Option<Duration>,
    /// Raw redirect target as found in the response
    pub location: Option<String>,
    /// `location` resolved against this hop's URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_location: Option<String>,
    pub redirect_type: RedirectType,
    pub meta_refresh: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl: Option<TlsSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<TimingBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<String>,
    /// Transport error message on "Fetch failed" hops
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<SecurityAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo: Option<SeoAnalysis>,
}

impl Hop {
    /// Synthetic hop recorded when `url` was already visited.
    pub fn loop_detected(url: &Url) -> Self {
        Self::synthetic(url, LOOP_DETECTED_STATUS_TEXT, None)
    }

    /// Synthetic hop recorded when fetching `url` failed at the transport level.
    pub fn fetch_failed(url: &Url, error: String) -> Self {
        Self::synthetic(url, FETCH_FAILED_STATUS_TEXT, Some(error))
    }

    fn synthetic(url: &Url, status_text: &str, error: Option<String>) -> Self {
        Self {
            url: url.to_string(),
            host: host_with_port(url),
            status: 0,
            status_text: status_text.to_string(),
            duration: None,
            location: None,
            resolved_location: None,
            redirect_type: RedirectType::None,
            meta_refresh: false,
            headers: None,
            ssl: None,
            server: None,
            timing: None,
            body_size: None,
            compression: None,
            error,
            security: None,
            seo: None,
        }
    }

    /// Whether this hop was produced without a response (loop or fetch failure).
    pub fn is_synthetic(&self) -> bool {
        self.status == 0
    }

    /// Looks up a normalized (lower-case) response header.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .as_ref()
            .and_then(|headers| headers.get(name))
            .map(String::as_str)
    }
}

/// How a resolution run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Termination {
    /// The last hop indicated no further redirect.
    Terminal,
    /// A URL was about to be fetched a second time.
    LoopDetected,
    /// The hop cap was reached while redirects continued.
    HopLimitReached,
    /// The transport failed on the last hop.
    FetchFailed,
}

/// The ordered hop list of one resolution run and how it ended.
#[derive(Debug, Clone)]
pub struct ResolvedChain {
    pub hops: Vec<Hop>,
    pub termination: Termination,
}

impl ResolvedChain {
    /// The last hop (the chain is never empty).
    pub fn terminal(&self) -> Option<&Hop> {
        self.hops.last()
    }

    /// Sequence of redirect mechanisms, one per hop.
    pub fn redirect_types(&self) -> Vec<RedirectType> {
        self.hops.iter().map(|hop| hop.redirect_type).collect()
    }
}

/// `host[:port]` of a URL, matching the WHATWG `host` getter.
pub fn host_with_port(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    }
}

/// Renders elapsed time as `"0.123 s"`, or `"N/A"` for synthetic hops.
pub fn format_duration(duration: Option<Duration>) -> String {
    match duration {
        Some(d) => format!("{:.3} s", d.as_secs_f64()),
        None => "N/A".to_string(),
    }
}

fn serialize_duration<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_duration(*duration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_redirect_type_wire_names() {
        assert_eq!(
            serde_json::to_value(RedirectType::MetaRefresh).unwrap(),
            "meta-refresh"
        );
        assert_eq!(serde_json::to_value(RedirectType::Http).unwrap(), "http");
        assert_eq!(RedirectType::Javascript.to_string(), "javascript");
        assert_eq!(
            RedirectType::from_str("none").unwrap(),
            RedirectType::None
        );
    }

    #[test]
    fn test_synthetic_hop_serialization() {
        let url = Url::parse("https://example.com:8443/a").unwrap();
        let hop = Hop::loop_detected(&url);
        let json = serde_json::to_value(&hop).unwrap();

        assert_eq!(json["status"], 0);
        assert_eq!(json["statusText"], "Redirect loop detected");
        assert_eq!(json["duration"], "N/A");
        assert_eq!(json["host"], "example.com:8443");
        assert!(json["location"].is_null());
        assert_eq!(json["redirectType"], "none");
        assert!(json.get("security").is_none());
        assert!(hop.is_synthetic());
    }

    #[test]
    fn test_duration_formatting() {
        let url = Url::parse("https://example.com/").unwrap();
        let mut hop = Hop::fetch_failed(&url, "boom".to_string());
        hop.duration = Some(Duration::from_millis(1234));
        let json = serde_json::to_value(&hop).unwrap();
        assert_eq!(json["duration"], "1.234 s");
        assert_eq!(json["error"], "boom");
    }

    #[test]
    fn test_host_with_port_default_port_omitted() {
        let url = Url::parse("https://example.com:443/").unwrap();
        assert_eq!(host_with_port(&url), "example.com");
    }
}
