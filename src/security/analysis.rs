//! Security header scoring.
//!
//! The score starts at 50 and every rule adjusts it independently; the total
//! is clamped to 0-100. Mixed content across the chain costs another 15.

use std::collections::BTreeMap;

use url::Url;

use super::types::{HstsConfig, SecurityAnalysis, SecurityHeaders, SecurityIssue, Severity};
use crate::config::{
    HEADER_CONTENT_SECURITY_POLICY, HEADER_EXPECT_CT, HEADER_PERMISSIONS_POLICY,
    HEADER_REFERRER_POLICY, HEADER_STRICT_TRANSPORT_SECURITY, HEADER_X_CONTENT_TYPE_OPTIONS,
    HEADER_X_FRAME_OPTIONS, HSTS_RECOMMENDED_MAX_AGE,
};
use crate::fetch::headers::non_empty;
use crate::models::Hop;

const BASE_SCORE: i32 = 50;
const MIXED_CONTENT_PENALTY: i32 = 15;

/// Scores the security headers of a normalized header map.
pub fn analyze_security_headers(headers: &BTreeMap<String, String>) -> SecurityAnalysis {
    let security_headers = extract_security_headers(headers);
    let mut issues = Vec::new();
    let mut recommendations = Vec::new();
    let mut score = BASE_SCORE;

    match &security_headers.hsts {
        Some(hsts) => {
            score += 20;
            if hsts.max_age < HSTS_RECOMMENDED_MAX_AGE {
                issues.push(SecurityIssue::new(
                    Severity::Medium,
                    "HSTS max-age too short",
                    format!(
                        "HSTS max-age is {} seconds. Recommended minimum is {} (1 year).",
                        hsts.max_age, HSTS_RECOMMENDED_MAX_AGE
                    ),
                    "Increase HSTS max-age to at least 31536000 seconds",
                ));
                score -= 5;
            }
            if !hsts.include_sub_domains {
                recommendations
                    .push("Consider adding includeSubDomains to HSTS header".to_string());
            }
        }
        None => {
            issues.push(SecurityIssue::new(
                Severity::High,
                "Missing HSTS header",
                "Strict-Transport-Security header is not set, leaving the site vulnerable to SSL stripping attacks.",
                "Add Strict-Transport-Security: max-age=31536000; includeSubDomains; preload",
            ));
            score -= 20;
        }
    }

    match &security_headers.csp {
        Some(csp) => {
            score += 15;
            if csp.contains("unsafe-inline") || csp.contains("unsafe-eval") {
                issues.push(SecurityIssue::new(
                    Severity::Medium,
                    "Weak Content Security Policy",
                    "CSP contains 'unsafe-inline' or 'unsafe-eval', reducing its effectiveness.",
                    "Remove 'unsafe-inline' and 'unsafe-eval' from CSP, use nonces or hashes instead",
                ));
                score -= 5;
            }
        }
        None => {
            recommendations.push(
                "Consider adding Content-Security-Policy header to prevent XSS attacks".to_string(),
            );
            score -= 10;
        }
    }

    if security_headers.x_frame_options.is_some() {
        score += 10;
    } else {
        issues.push(SecurityIssue::new(
            Severity::Medium,
            "Missing X-Frame-Options",
            "X-Frame-Options header is not set, making the site vulnerable to clickjacking.",
            "Add X-Frame-Options: DENY or SAMEORIGIN",
        ));
        score -= 10;
    }

    if security_headers.x_content_type_options {
        score += 5;
    } else {
        recommendations
            .push("Add X-Content-Type-Options: nosniff to prevent MIME type sniffing".to_string());
        score -= 5;
    }

    if security_headers.referrer_policy.is_some() {
        score += 5;
    } else {
        recommendations
            .push("Add Referrer-Policy header to control referrer information".to_string());
    }

    if security_headers.permissions_policy.is_some() {
        score += 5;
    }

    SecurityAnalysis {
        score: clamp_score(score),
        headers: security_headers,
        issues,
        recommendations,
        mixed_content: false,
    }
}

/// Collects the security headers; blank values count as absent.
pub fn extract_security_headers(headers: &BTreeMap<String, String>) -> SecurityHeaders {
    let owned = |name: &str| non_empty(headers, name).map(str::to_string);

    SecurityHeaders {
        hsts: non_empty(headers, HEADER_STRICT_TRANSPORT_SECURITY).map(parse_hsts),
        csp: owned(HEADER_CONTENT_SECURITY_POLICY),
        x_frame_options: owned(HEADER_X_FRAME_OPTIONS),
        x_content_type_options: non_empty(headers, HEADER_X_CONTENT_TYPE_OPTIONS)
            .is_some_and(|v| v.eq_ignore_ascii_case("nosniff")),
        referrer_policy: owned(HEADER_REFERRER_POLICY),
        permissions_policy: owned(HEADER_PERMISSIONS_POLICY),
        expect_ct: owned(HEADER_EXPECT_CT),
    }
}

/// Parses `max-age`, `includeSubDomains`, and `preload` directives.
///
/// A missing or unparsable max-age is treated as 0.
pub fn parse_hsts(value: &str) -> HstsConfig {
    let mut config = HstsConfig::default();

    for directive in value.split(';').map(str::trim) {
        let lower = directive.to_ascii_lowercase();
        if let Some(age) = lower.strip_prefix("max-age") {
            config.max_age = age
                .trim_start()
                .strip_prefix('=')
                .map(|v| v.trim().trim_matches('"'))
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(0);
        } else if lower == "includesubdomains" {
            config.include_sub_domains = true;
        } else if lower == "preload" {
            config.preload = true;
        }
    }

    config
}

/// True when an HTTPS hop is followed anywhere later by a plain HTTP hop.
pub fn detect_mixed_content(chain: &[Hop]) -> bool {
    let mut had_https = false;

    for hop in chain {
        match Url::parse(&hop.url).as_ref().map(Url::scheme) {
            Ok("https") => had_https = true,
            Ok("http") if had_https => return true,
            _ => {}
        }
    }

    false
}

/// Folds chain-level mixed content into an already computed analysis.
pub fn apply_mixed_content(analysis: &mut SecurityAnalysis, chain: &[Hop]) {
    if !detect_mixed_content(chain) {
        return;
    }

    analysis.mixed_content = true;
    analysis.issues.push(SecurityIssue::new(
        Severity::High,
        "Mixed Content Detected",
        "The redirect chain includes both HTTPS and HTTP URLs, which can expose users to security risks.",
        "Ensure all URLs in the redirect chain use HTTPS",
    ));
    analysis.score = clamp_score(i32::from(analysis.score) - MIXED_CONTENT_PENALTY);
}

fn clamp_score(score: i32) -> u8 {
    // Clamped into 0..=100, so the cast cannot truncate.
    score.clamp(0, 100) as u8
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

    fn hop(url: &str) -> Hop {
        Hop::loop_detected(&Url::parse(url).unwrap())
    }

    fn strong_headers() -> BTreeMap<String, String> {
        headers(&[
            (
                "strict-transport-security",
                "max-age=63072000; includeSubDomains; preload",
            ),
            ("content-security-policy", "default-src 'self'"),
            ("x-frame-options", "DENY"),
            ("x-content-type-options", "nosniff"),
            ("referrer-policy", "no-referrer"),
            ("permissions-policy", "geolocation=()"),
        ])
    }

    #[test]
    fn test_no_security_headers_scores_five() {
        let analysis = analyze_security_headers(&headers(&[]));
        assert_eq!(analysis.score, 5);
        assert!(!analysis.mixed_content);
        assert!(analysis
            .issues
            .iter()
            .any(|i| i.title == "Missing HSTS header" && i.severity == Severity::High));
        assert!(analysis
            .issues
            .iter()
            .any(|i| i.title == "Missing X-Frame-Options" && i.severity == Severity::Medium));
        assert_eq!(analysis.issues.len(), 2);
        assert_eq!(analysis.recommendations.len(), 3);
    }

    #[test]
    fn test_all_headers_clamped_to_hundred() {
        // 50 + 20 + 15 + 10 + 5 + 5 + 5 = 110
        let analysis = analyze_security_headers(&strong_headers());
        assert_eq!(analysis.score, 100);
        assert!(analysis.issues.is_empty());
        assert!(analysis.recommendations.is_empty());
        let hsts = analysis.headers.hsts.unwrap();
        assert_eq!(hsts.max_age, 63_072_000);
        assert!(hsts.include_sub_domains);
        assert!(hsts.preload);
    }

    #[test]
    fn test_short_hsts_and_weak_csp() {
        let analysis = analyze_security_headers(&headers(&[
            ("strict-transport-security", "max-age=300"),
            (
                "content-security-policy",
                "script-src 'self' 'unsafe-inline'",
            ),
        ]));
        // 50 + 20 - 5 + 15 - 5 - 10 (xfo) - 5 (xcto) = 60
        assert_eq!(analysis.score, 60);
        assert!(analysis
            .issues
            .iter()
            .any(|i| i.title == "HSTS max-age too short"));
        assert!(analysis
            .issues
            .iter()
            .any(|i| i.title == "Weak Content Security Policy"));
        assert!(analysis
            .recommendations
            .iter()
            .any(|r| r.contains("includeSubDomains")));
    }

    #[test]
    fn test_content_type_options_requires_nosniff() {
        let analysis =
            analyze_security_headers(&headers(&[("x-content-type-options", "sniff-away")]));
        assert!(!analysis.headers.x_content_type_options);
        assert_eq!(analysis.score, 5);

        let analysis = analyze_security_headers(&headers(&[("x-content-type-options", "NoSniff")]));
        assert!(analysis.headers.x_content_type_options);
        assert_eq!(analysis.score, 15);
    }

    #[test]
    fn test_blank_header_counts_as_absent() {
        let analysis = analyze_security_headers(&headers(&[("x-frame-options", "  ")]));
        assert_eq!(analysis.headers.x_frame_options, None);
        assert_eq!(analysis.score, 5);
    }

    #[test]
    fn test_expect_ct_captured_without_score() {
        let analysis = analyze_security_headers(&headers(&[("expect-ct", "max-age=86400")]));
        assert_eq!(analysis.headers.expect_ct.as_deref(), Some("max-age=86400"));
        assert_eq!(analysis.score, 5);
    }

    #[test]
    fn test_parse_hsts_variants() {
        assert_eq!(parse_hsts("max-age=31536000").max_age, 31_536_000);
        assert_eq!(parse_hsts("Max-Age = \"600\"").max_age, 600);
        assert_eq!(parse_hsts("max-age=abc").max_age, 0);
        assert_eq!(parse_hsts("includeSubDomains").max_age, 0);
        assert!(parse_hsts("max-age=1; INCLUDESUBDOMAINS").include_sub_domains);
    }

    #[test]
    fn test_detect_mixed_content() {
        assert!(detect_mixed_content(&[
            hop("https://a.example/"),
            hop("http://b.example/")
        ]));
        assert!(detect_mixed_content(&[
            hop("https://a.example/"),
            hop("https://b.example/"),
            hop("http://c.example/"),
        ]));
        assert!(!detect_mixed_content(&[
            hop("http://a.example/"),
            hop("https://b.example/")
        ]));
        assert!(!detect_mixed_content(&[hop("https://a.example/")]));
    }

    #[test]
    fn test_apply_mixed_content_penalty() {
        let mut analysis = analyze_security_headers(&strong_headers());
        apply_mixed_content(
            &mut analysis,
            &[hop("https://a.example/"), hop("http://b.example/")],
        );
        assert!(analysis.mixed_content);
        assert_eq!(analysis.score, 85);
        assert_eq!(analysis.issues.last().unwrap().severity, Severity::High);
    }

    #[test]
    fn test_mixed_content_penalty_clamps_at_zero() {
        let mut analysis = analyze_security_headers(&headers(&[]));
        apply_mixed_content(
            &mut analysis,
            &[hop("https://a.example/"), hop("http://b.example/")],
        );
        assert_eq!(analysis.score, 0);
    }

    #[test]
    fn test_apply_mixed_content_noop_for_clean_chain() {
        let mut analysis = analyze_security_headers(&headers(&[]));
        apply_mixed_content(&mut analysis, &[hop("https://a.example/")]);
        assert!(!analysis.mixed_content);
        assert_eq!(analysis.score, 5);
    }
}
