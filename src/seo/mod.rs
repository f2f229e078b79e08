//! SEO impact analysis of a resolved redirect chain.
//!
//! The score reflects how much the observed redirect path costs in search
//! ranking terms (hop count, redirect mechanism, robots directives), while
//! recommendations also cover on-page basics of the terminal document.

mod analysis;
mod extract;
mod types;

pub use analysis::{analyze_seo, calculate_link_equity};
pub use types::{HreflangLink, SeoAnalysis};

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use url::Url;

    use super::*;
    use crate::models::{Hop, RedirectType};

    const GOOD_PAGE: &str = r#"<html><head>
<title>Example Domain Landing Page</title>
<meta name="description" content="A landing page with a description long enough to satisfy the length check.">
<script type="application/ld+json">{}</script>
</head><body><h1>Landing</h1></body></html>"#;

    fn hop(url: &str, status: u16, redirect_type: RedirectType) -> Hop {
        let parsed = Url::parse(url).expect("valid test url");
        let mut hop = Hop::loop_detected(&parsed);
        hop.status = status;
        hop.status_text = String::new();
        hop.redirect_type = redirect_type;
        hop.meta_refresh = redirect_type == RedirectType::MetaRefresh;
        hop
    }

    fn no_headers() -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    #[test]
    fn test_no_redirects_scores_100() {
        let chain = vec![hop("https://a.example/", 200, RedirectType::None)];
        let seo = analyze_seo(&no_headers(), Some(GOOD_PAGE), &chain);
        assert_eq!(seo.impact_score, 100);
        assert!(seo.recommendations.is_empty(), "{:?}", seo.recommendations);
        assert_eq!(seo.link_equity, vec![100.0]);
    }

    #[test]
    fn test_single_301_scores_95() {
        let chain = vec![
            hop("https://a.example/", 301, RedirectType::Http),
            hop("https://b.example/", 200, RedirectType::None),
        ];
        let seo = analyze_seo(&no_headers(), Some(GOOD_PAGE), &chain);
        assert_eq!(seo.impact_score, 95);
        assert_eq!(seo.link_equity.len(), 2);
        assert!((seo.link_equity[1] - 99.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_302_scores_80_with_recommendation() {
        let chain = vec![
            hop("https://a.example/", 302, RedirectType::Http),
            hop("https://b.example/", 200, RedirectType::None),
        ];
        let seo = analyze_seo(&no_headers(), Some(GOOD_PAGE), &chain);
        assert_eq!(seo.impact_score, 80);
        assert!(seo.recommendations.iter().any(|r| r.contains("Use 301")));
    }

    #[test]
    fn test_single_307_scores_85() {
        let chain = vec![
            hop("https://a.example/", 307, RedirectType::Http),
            hop("https://b.example/", 200, RedirectType::None),
        ];
        let seo = analyze_seo(&no_headers(), Some(GOOD_PAGE), &chain);
        assert_eq!(seo.impact_score, 85);
    }

    #[test]
    fn test_two_and_three_redirects() {
        let two = vec![
            hop("https://a.example/", 301, RedirectType::Http),
            hop("https://b.example/", 301, RedirectType::Http),
            hop("https://c.example/", 200, RedirectType::None),
        ];
        let seo = analyze_seo(&no_headers(), Some(GOOD_PAGE), &two);
        assert_eq!(seo.impact_score, 70);
        assert!(seo.recommendations.iter().any(|r| r.starts_with("Reduce redirect chain")));

        let mut three = two.clone();
        three.insert(0, hop("https://z.example/", 301, RedirectType::Http));
        let seo = analyze_seo(&no_headers(), Some(GOOD_PAGE), &three);
        assert_eq!(seo.impact_score, 50);
        assert!(seo.recommendations.iter().any(|r| r.starts_with("Critical:")));
    }

    #[test]
    fn test_meta_refresh_and_javascript_penalties() {
        let chain = vec![
            hop("https://a.example/", 200, RedirectType::MetaRefresh),
            hop("https://b.example/", 200, RedirectType::Javascript),
            hop("https://c.example/", 200, RedirectType::None),
        ];
        let seo = analyze_seo(&no_headers(), Some(GOOD_PAGE), &chain);
        // 70 - 10 - 15
        assert_eq!(seo.impact_score, 45);

        let expected_second = 100.0 * 0.97 * 0.90;
        assert!((seo.link_equity[1] - expected_second).abs() < 1e-9);
    }

    #[test]
    fn test_noindex_forces_zero() {
        let chain = vec![hop("https://a.example/", 200, RedirectType::None)];
        let headers: BTreeMap<String, String> =
            [("x-robots-tag".to_string(), "NoIndex".to_string())].into();
        let seo = analyze_seo(&headers, Some(GOOD_PAGE), &chain);
        assert_eq!(seo.impact_score, 0);
        assert_eq!(seo.robots_tag.as_deref(), Some("NoIndex"));
        assert!(seo.recommendations.iter().any(|r| r.contains("noindex")));
    }

    #[test]
    fn test_meta_robots_noindex_overrides_redirect_penalties() {
        let chain = vec![
            hop("https://a.example/", 200, RedirectType::Javascript),
            hop("https://b.example/", 200, RedirectType::None),
        ];
        let body = GOOD_PAGE.replace(
            "</head>",
            r#"<meta content="NOINDEX" name="robots"></head>"#,
        );
        let seo = analyze_seo(&no_headers(), Some(&body), &chain);
        assert_eq!(seo.impact_score, 0);
        assert_eq!(seo.meta_robots.as_deref(), Some("NOINDEX"));
        assert!(seo.recommendations.iter().any(|r| r.contains("noindex")));
        assert!(seo.recommendations.iter().any(|r| r.contains("JavaScript")));
    }

    #[test]
    fn test_meta_robots_nofollow_is_recommendation_only() {
        let chain = vec![hop("https://a.example/", 200, RedirectType::None)];
        let body = GOOD_PAGE.replace(
            "</head>",
            r#"<meta name="robots" content="index, nofollow"></head>"#,
        );
        let seo = analyze_seo(&no_headers(), Some(&body), &chain);
        assert_eq!(seo.impact_score, 100);
        assert!(seo.recommendations.iter().any(|r| r.contains("nofollow")));
    }

    #[test]
    fn test_cross_origin_canonical() {
        let chain = vec![hop("https://a.example/page", 200, RedirectType::None)];
        let cross = GOOD_PAGE.replace(
            "</head>",
            r#"<link rel="canonical" href="https://other.example/page"></head>"#,
        );
        let seo = analyze_seo(&no_headers(), Some(&cross), &chain);
        assert!(seo.recommendations.iter().any(|r| r.starts_with("Canonical URL")));

        let relative = GOOD_PAGE.replace(
            "</head>",
            r#"<link rel="canonical" href="/page"></head>"#,
        );
        let seo = analyze_seo(&no_headers(), Some(&relative), &chain);
        assert!(!seo.recommendations.iter().any(|r| r.starts_with("Canonical URL")));
    }

    #[test]
    fn test_missing_body_recommends_page_basics() {
        let chain = vec![hop("https://a.example/", 200, RedirectType::None)];
        let seo = analyze_seo(&no_headers(), None, &chain);
        assert_eq!(seo.impact_score, 100);
        assert_eq!(seo.recommendations.len(), 4);
    }

    #[test]
    fn test_title_and_description_length_checks() {
        let chain = vec![hop("https://a.example/", 200, RedirectType::None)];
        let body = format!(
            "<html><head><title>{}</title><meta name=\"description\" content=\"{}\"></head><body><h1>x</h1></body></html>",
            "t".repeat(61),
            "d".repeat(161)
        );
        let seo = analyze_seo(&no_headers(), Some(&body), &chain);
        assert!(seo.recommendations.iter().any(|r| r.starts_with("Title tag is too long")));
        assert!(seo
            .recommendations
            .iter()
            .any(|r| r.starts_with("Meta description is too long")));
    }

    #[test]
    fn test_link_equity_empty_chain() {
        assert!(calculate_link_equity(&[]).is_empty());
    }
}
