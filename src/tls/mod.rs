//! TLS summary for HTTPS hops.
//!
//! This module never validates a certificate chain. It summarizes whatever
//! transport metadata the fetcher handed over:
//! - Peer certificate subject, issuer, and expiry (read with `x509-parser`)
//! - Negotiated protocol and cipher, when the transport reports them
//!
//! Without metadata a fallback record is produced. In both cases `valid` only
//! means the TLS connection succeeded; it is not a statement about the
//! certificate.

mod extract;

use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

use crate::config::TLS_EXPIRY_WARNING_DAYS;
use extract::parse_certificate;

/// TLS details reported by the transport for one response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportTlsInfo {
    /// Negotiated protocol version (e.g. "TLSv1.3")
    pub protocol: Option<String>,
    /// Negotiated cipher suite
    pub cipher: Option<String>,
    /// DER bytes of the leaf certificate
    pub peer_certificate_der: Option<Vec<u8>>,
}

impl TransportTlsInfo {
    fn is_empty(&self) -> bool {
        self.protocol.is_none() && self.cipher.is_none() && self.peer_certificate_der.is_none()
    }
}

/// Best-effort TLS summary attached to HTTPS hops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsSummary {
    pub valid: bool,
    pub issuer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_until_expiry: Option<i64>,
    pub protocol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cipher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Produces the TLS summary for `url`, or `None` for non-HTTPS URLs.
pub fn extract_tls_summary(url: &Url, transport: Option<&TransportTlsInfo>) -> Option<TlsSummary> {
    summarize_tls(url, transport, Utc::now())
}

/// Same as [`extract_tls_summary`] with an explicit clock.
pub fn summarize_tls(
    url: &Url,
    transport: Option<&TransportTlsInfo>,
    now: DateTime<Utc>,
) -> Option<TlsSummary> {
    if url.scheme() != "https" {
        return None;
    }

    let hostname = url.host_str().map(str::to_string);

    let Some(info) = transport.filter(|info| !info.is_empty()) else {
        return Some(fallback_summary(hostname));
    };

    let certificate = info
        .peer_certificate_der
        .as_deref()
        .and_then(parse_certificate);

    let (issuer, subject, not_after) = match certificate {
        Some(cert) => (cert.issuer, Some(cert.subject), cert.not_after),
        None => ("Unknown".to_string(), hostname, None),
    };

    let days_until_expiry = not_after.map(|expiry| (expiry - now).num_days());

    Some(TlsSummary {
        valid: true,
        issuer,
        subject,
        expiry_date: not_after.map(|expiry| expiry.to_rfc3339()),
        days_until_expiry,
        protocol: info.protocol.clone().unwrap_or_else(|| "TLS".to_string()),
        cipher: info.cipher.clone(),
        warning: days_until_expiry.and_then(validate_expiry),
    })
}

/// Fallback used when the transport supplied no TLS details.
fn fallback_summary(hostname: Option<String>) -> TlsSummary {
    TlsSummary {
        valid: true,
        issuer: "Unknown".to_string(),
        subject: hostname,
        expiry_date: None,
        days_until_expiry: None,
        protocol: "TLS".to_string(),
        cipher: None,
        warning: None,
    }
}

/// Warning text for a certificate expiring in `days` (negative = expired).
pub fn validate_expiry(days: i64) -> Option<String> {
    if days < 0 {
        Some("SSL certificate has expired".to_string())
    } else if days < TLS_EXPIRY_WARNING_DAYS {
        Some(format!("SSL certificate expires in {days} days"))
    } else {
        None
    }
}
