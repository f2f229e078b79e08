//! Response header normalization.
//!
//! Header names are case-insensitive, so every analyzer works on a map keyed
//! by the lower-cased name. When a name repeats, the last value wins; merged
//! multi-value headers (e.g. several `Set-Cookie`) are not preserved.

use std::collections::BTreeMap;

use crate::config::{HEADER_CONTENT_ENCODING, HEADER_CONTENT_LENGTH, MAX_HEADER_COUNT};

/// Canonicalizes raw response headers into a lower-case, unique mapping.
///
/// At most `MAX_HEADER_COUNT` headers are kept; the rest are dropped with a warning.
pub fn normalize_headers<'a, I>(raw: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut normalized = BTreeMap::new();
    let mut seen = 0usize;

    for (name, value) in raw {
        seen += 1;
        if seen > MAX_HEADER_COUNT {
            continue;
        }
        normalized.insert(name.to_ascii_lowercase(), value.to_string());
    }

    if seen > MAX_HEADER_COUNT {
        log::warn!(
            "Response has {} headers (limit: {}), ignoring excess headers",
            seen,
            MAX_HEADER_COUNT
        );
    }

    normalized
}

/// Returns the `Content-Encoding` of a response, if any.
pub fn detect_compression(headers: &BTreeMap<String, String>) -> Option<String> {
    headers
        .get(HEADER_CONTENT_ENCODING)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parses `Content-Length`; absent or unparsable values yield `None`.
pub fn parse_content_length(headers: &BTreeMap<String, String>) -> Option<u64> {
    headers
        .get(HEADER_CONTENT_LENGTH)
        .and_then(|v| v.trim().parse::<u64>().ok())
}

/// Returns a header value only when it is present and not blank.
pub(crate) fn non_empty<'a>(headers: &'a BTreeMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}
