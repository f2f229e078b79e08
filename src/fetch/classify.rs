//! Redirect classification.
//!
//! Decides whether a response points somewhere else and by which mechanism.
//! Priority is fixed: HTTP status, then meta refresh, then JavaScript.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::{HEADER_LOCATION, REDIRECT_STATUS_CODES};
use crate::fetch::headers::non_empty;
use crate::models::RedirectType;

/// Outcome of classifying one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// 3xx redirect. `location` is `None` when the header is missing.
    Http { location: Option<String> },
    /// `<meta http-equiv="refresh">`. The delay is parsed but never honored.
    MetaRefresh { url: String, delay: Option<u64> },
    /// Script-driven `location` change.
    JavaScript { url: String },
    /// No redirect indicated.
    Terminal,
}

impl Classification {
    pub fn redirect_type(&self) -> RedirectType {
        match self {
            Classification::Http { .. } => RedirectType::Http,
            Classification::MetaRefresh { .. } => RedirectType::MetaRefresh,
            Classification::JavaScript { .. } => RedirectType::Javascript,
            Classification::Terminal => RedirectType::None,
        }
    }

    /// The raw next location, if one was found.
    pub fn location(&self) -> Option<&str> {
        match self {
            Classification::Http { location } => location.as_deref(),
            Classification::MetaRefresh { url, .. } | Classification::JavaScript { url } => {
                Some(url)
            }
            Classification::Terminal => None,
        }
    }

    pub fn is_meta_refresh(&self) -> bool {
        matches!(self, Classification::MetaRefresh { .. })
    }
}

/// Whether `status` is one of the redirect status codes.
pub fn is_redirect_status(status: u16) -> bool {
    REDIRECT_STATUS_CODES.contains(&status)
}

/// Whether a fetcher should read the body of a response with `status`.
///
/// Bodies of redirect responses are never inspected.
pub fn should_read_body(status: u16, include_body: bool) -> bool {
    include_body && !is_redirect_status(status)
}

/// Classifies a response. `body` is only consulted for non-redirect statuses.
pub fn classify_response(
    status: u16,
    headers: &BTreeMap<String, String>,
    body: Option<&str>,
) -> Classification {
    if is_redirect_status(status) {
        return Classification::Http {
            location: non_empty(headers, HEADER_LOCATION).map(str::to_string),
        };
    }

    let Some(body) = body else {
        return Classification::Terminal;
    };

    if let Some((url, delay)) = extract_meta_refresh(body) {
        return Classification::MetaRefresh { url, delay };
    }

    match detect_javascript_redirect(body) {
        Some(url) => Classification::JavaScript { url },
        None => Classification::Terminal,
    }
}

// Both attribute orders of a meta refresh tag.
static META_REFRESH_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r#"(?i)<meta[^>]*http-equiv=["']refresh["'][^>]*content=["'](\d+)\s*;\s*url=([^"']+)["']"#,
        r#"(?i)<meta[^>]*content=["'](\d+)\s*;\s*url=([^"']+)["'][^>]*http-equiv=["']refresh["']"#,
    ])
});

// Checked in order; the first pattern that matches anywhere wins.
static JS_REDIRECT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r#"(?i)window\.location\s*=\s*["']([^"']+)["']"#,
        r#"(?i)window\.location\.href\s*=\s*["']([^"']+)["']"#,
        r#"(?i)window\.location\.replace\s*\(\s*["']([^"']+)["']\s*\)"#,
        r#"(?i)location\.href\s*=\s*["']([^"']+)["']"#,
        r#"(?i)location\.replace\s*\(\s*["']([^"']+)["']\s*\)"#,
        r#"(?i)document\.location\s*=\s*["']([^"']+)["']"#,
        r#"(?i)document\.location\.href\s*=\s*["']([^"']+)["']"#,
    ])
});

fn compile_patterns(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|p| match Regex::new(p) {
            Ok(re) => Some(re),
            Err(e) => {
                log::error!("Failed to compile redirect pattern '{}': {}", p, e);
                None
            }
        })
        .collect()
}

/// Extracts `(url, delay)` from the first meta refresh tag in `html`.
pub fn extract_meta_refresh(html: &str) -> Option<(String, Option<u64>)> {
    META_REFRESH_PATTERNS.iter().find_map(|re| {
        let caps = re.captures(html)?;
        let delay = caps.get(1).and_then(|m| m.as_str().parse::<u64>().ok());
        let url = caps.get(2)?.as_str().trim();
        (!url.is_empty()).then(|| (url.to_string(), delay))
    })
}

/// Returns the target of the first matching JavaScript redirect pattern.
pub fn detect_javascript_redirect(html: &str) -> Option<String> {
    JS_REDIRECT_PATTERNS.iter().find_map(|re| {
        re.captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|url| !url.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_http_redirect_wins_over_body() {
        let body = r#"<meta http-equiv="refresh" content="0;url=/meta">"#;
        let result = classify_response(
            301,
            &headers(&[("location", "https://b.example")]),
            Some(body),
        );
        assert_eq!(
            result,
            Classification::Http {
                location: Some("https://b.example".to_string())
            }
        );
        assert_eq!(result.redirect_type(), RedirectType::Http);
    }

    #[test]
    fn test_all_redirect_codes() {
        for status in [301, 302, 303, 307, 308] {
            let result = classify_response(status, &headers(&[("location", "/next")]), None);
            assert_eq!(result.location(), Some("/next"), "status {status}");
        }
        let result = classify_response(304, &headers(&[("location", "/next")]), None);
        assert_eq!(result, Classification::Terminal);
    }

    #[test]
    fn test_http_redirect_without_location() {
        let result = classify_response(302, &headers(&[]), None);
        assert_eq!(result, Classification::Http { location: None });
        assert_eq!(result.location(), None);
    }

    #[test]
    fn test_meta_refresh_http_equiv_first() {
        let body = r#"<html><head><meta http-equiv="refresh" content="0;url=/x"></head></html>"#;
        let result = classify_response(200, &headers(&[]), Some(body));
        assert_eq!(
            result,
            Classification::MetaRefresh {
                url: "/x".to_string(),
                delay: Some(0)
            }
        );
        assert!(result.is_meta_refresh());
    }

    #[test]
    fn test_meta_refresh_content_first_case_insensitive() {
        let body = r#"<META CONTENT='5; URL=https://elsewhere.example/' HTTP-EQUIV='Refresh'>"#;
        let (url, delay) = extract_meta_refresh(body).expect("should match");
        assert_eq!(url, "https://elsewhere.example/");
        assert_eq!(delay, Some(5));
    }

    #[test]
    fn test_meta_refresh_beats_javascript() {
        let body = r#"<meta http-equiv="refresh" content="1;url=/meta">
            <script>window.location = "/js";</script>"#;
        let result = classify_response(200, &headers(&[]), Some(body));
        assert_eq!(result.redirect_type(), RedirectType::MetaRefresh);
        assert_eq!(result.location(), Some("/meta"));
    }

    #[test]
    fn test_javascript_patterns() {
        let cases = [
            (r#"window.location = "/a""#, "/a"),
            (r#"window.location.href='/b'"#, "/b"),
            (r#"window.location.replace( "/c" )"#, "/c"),
            (r#"location.href = "/d""#, "/d"),
            (r#"location.replace('/e')"#, "/e"),
            (r#"document.location = "/f""#, "/f"),
            (r#"document.location.href = "/g""#, "/g"),
            (r#"WINDOW.LOCATION = "/h""#, "/h"),
        ];
        for (script, expected) in cases {
            assert_eq!(
                detect_javascript_redirect(script).as_deref(),
                Some(expected),
                "script: {script}"
            );
        }
    }

    #[test]
    fn test_javascript_pattern_order_not_position() {
        // location.href appears first in the text, but window.location = is checked first.
        let body = r#"location.href = "/second"; window.location = "/first";"#;
        assert_eq!(detect_javascript_redirect(body).as_deref(), Some("/first"));
    }

    #[test]
    fn test_javascript_comparison_is_not_redirect() {
        let body = r#"if (window.location == "/x") { console.log(1); }"#;
        assert_eq!(detect_javascript_redirect(body), None);
    }

    #[test]
    fn test_no_body_is_terminal() {
        let result = classify_response(200, &headers(&[]), None);
        assert_eq!(result, Classification::Terminal);
        assert_eq!(result.redirect_type(), RedirectType::None);
    }

    #[test]
    fn test_plain_page_is_terminal() {
        let body = "<html><head><title>Hello</title></head><body>Hi</body></html>";
        assert_eq!(
            classify_response(200, &headers(&[]), Some(body)),
            Classification::Terminal
        );
    }

    #[test]
    fn test_should_read_body() {
        assert!(should_read_body(200, true));
        assert!(!should_read_body(200, false));
        assert!(!should_read_body(301, true));
        assert!(should_read_body(404, true));
    }
}
