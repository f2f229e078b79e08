//! Server fingerprinting from response headers.
//!
//! Parses the `Server` header into name and version and collects technology
//! hints from a static table of well-known headers.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::config::{
    HEADER_SERVER, HEADER_X_ASPNET_VERSION, HEADER_X_DRUPAL_CACHE, HEADER_X_NEXTJS_CACHE,
    HEADER_X_POWERED_BY,
};
use crate::fetch::headers::non_empty;

/// How a header's presence is turned into a technology label.
#[derive(Debug, Clone, Copy)]
pub enum TechnologyLabel {
    /// Use the header value verbatim.
    Value,
    /// Prefix the header value (e.g. "ASP.NET 4.0.30319").
    Prefixed(&'static str),
    /// Fixed label whenever the header is present.
    Fixed(&'static str),
}

/// One entry of the header fingerprint table.
#[derive(Debug, Clone, Copy)]
pub struct TechnologyHeader {
    pub header: &'static str,
    pub label: TechnologyLabel,
}

/// Well-known technology-revealing headers, in reporting order.
pub const TECHNOLOGY_HEADERS: &[TechnologyHeader] = &[
    TechnologyHeader {
        header: HEADER_X_POWERED_BY,
        label: TechnologyLabel::Value,
    },
    TechnologyHeader {
        header: HEADER_X_ASPNET_VERSION,
        label: TechnologyLabel::Prefixed("ASP.NET"),
    },
    TechnologyHeader {
        header: HEADER_X_DRUPAL_CACHE,
        label: TechnologyLabel::Fixed("Drupal"),
    },
    TechnologyHeader {
        header: HEADER_X_NEXTJS_CACHE,
        label: TechnologyLabel::Fixed("Next.js"),
    },
];

/// Server software and technology hints for one response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub technology: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub powered_by: Option<String>,
}

// "nginx/1.21.0", "Apache/2.4.41 (Ubuntu)", "cloudflare"
static SERVER_HEADER_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^([^\s/]+)(?:/(\S+))?")
        .map_err(|e| log::error!("Failed to compile server header pattern: {e}"))
        .ok()
});

/// Derives server information using [`TECHNOLOGY_HEADERS`].
///
/// Returns `None` when neither `Server` nor `X-Powered-By` is present.
pub fn detect_server(headers: &BTreeMap<String, String>) -> Option<ServerInfo> {
    detect_server_with(headers, TECHNOLOGY_HEADERS)
}

/// Derives server information using a caller-supplied fingerprint table.
pub fn detect_server_with(
    headers: &BTreeMap<String, String>,
    table: &[TechnologyHeader],
) -> Option<ServerInfo> {
    let server = non_empty(headers, HEADER_SERVER);
    let powered_by = non_empty(headers, HEADER_X_POWERED_BY);

    if server.is_none() && powered_by.is_none() {
        return None;
    }

    let (name, version) = server.map(parse_server_header).unwrap_or((None, None));

    let technology = table
        .iter()
        .filter_map(|entry| {
            let value = non_empty(headers, entry.header)?;
            Some(match entry.label {
                TechnologyLabel::Value => value.to_string(),
                TechnologyLabel::Prefixed(prefix) => format!("{prefix} {value}"),
                TechnologyLabel::Fixed(label) => label.to_string(),
            })
        })
        .collect();

    Some(ServerInfo {
        name,
        version,
        technology,
        powered_by: powered_by.map(str::to_string),
    })
}

fn parse_server_header(server: &str) -> (Option<String>, Option<String>) {
    let Some(re) = SERVER_HEADER_RE.as_ref() else {
        return (Some(server.to_string()), None);
    };
    match re.captures(server) {
        Some(caps) => (
            caps.get(1).map(|m| m.as_str().to_string()),
            caps.get(2).map(|m| m.as_str().to_string()),
        ),
        None => (None, None),
    }
}
