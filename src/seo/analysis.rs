//! SEO impact scoring.

use std::collections::BTreeMap;

use url::Url;

use super::extract::PageSignals;
use super::types::SeoAnalysis;
use crate::config::{
    HEADER_X_ROBOTS_TAG, META_DESCRIPTION_MAX_CHARS, META_DESCRIPTION_MIN_CHARS, TITLE_MAX_CHARS,
    TITLE_MIN_CHARS,
};
use crate::fetch::headers::non_empty;
use crate::models::{Hop, RedirectType};

const REC_PREFER_301: &str =
    "Use 301 (permanent) redirect instead of 302 (temporary) for better SEO";
const REC_REDUCE_CHAIN: &str = "Reduce redirect chain to a single hop for better SEO and performance";
const REC_CONSOLIDATE: &str =
    "Critical: Multiple redirects detected. Consolidate to single redirect for optimal SEO";
const REC_META_REFRESH: &str =
    "Meta refresh redirects are slower and less SEO-friendly than HTTP redirects";
const REC_JAVASCRIPT: &str =
    "JavaScript redirects may not be followed by all search engine crawlers";
const REC_CANONICAL_DOMAIN: &str =
    "Canonical URL points to different domain - verify this is intentional";
const REC_NOINDEX: &str =
    "Warning: Page has noindex directive and will not be indexed by search engines";
const REC_NOFOLLOW: &str = "Page has nofollow directive - links will not pass authority";
const REC_STRUCTURED_DATA: &str =
    "Consider adding structured data (JSON-LD) for rich snippets in search results";
const REC_TITLE_MISSING: &str = "Add descriptive title tag (50-60 characters recommended)";
const REC_TITLE_LONG: &str = "Title tag is too long - keep it under 60 characters";
const REC_DESCRIPTION_MISSING: &str = "Add meta description (150-160 characters recommended)";
const REC_DESCRIPTION_LONG: &str = "Meta description is too long - keep it under 160 characters";
const REC_H1_MISSING: &str = "Add H1 heading tag for better content structure";

/// Scores the SEO impact of `chain` and the terminal page.
///
/// `headers` and `body` belong to the terminal response; `chain` is the full
/// list of hops ending with that response. The score starts from a tier picked
/// by redirect count, is reduced for each meta-refresh or JavaScript hop, and
/// is forced to 0 when a `noindex` directive is present.
pub fn analyze_seo(
    headers: &BTreeMap<String, String>,
    body: Option<&str>,
    chain: &[Hop],
) -> SeoAnalysis {
    let signals = PageSignals::extract(headers, body);
    let robots_tag = non_empty(headers, HEADER_X_ROBOTS_TAG).map(str::to_string);
    let mut recommendations = Vec::new();

    let mut score = redirect_count_score(chain, &mut recommendations);

    for hop in chain {
        if hop.meta_refresh {
            score -= 10;
            recommendations.push(REC_META_REFRESH.to_string());
        }
        if hop.redirect_type == RedirectType::Javascript {
            score -= 15;
            recommendations.push(REC_JAVASCRIPT.to_string());
        }
    }

    if let (Some(canonical), Some(last)) = (signals.canonical.as_deref(), chain.last()) {
        if canonical_is_cross_origin(canonical, &last.url) {
            recommendations.push(REC_CANONICAL_DOMAIN.to_string());
        }
    }

    let directives = [robots_tag.as_deref(), signals.meta_robots.as_deref()];
    if has_directive(&directives, "noindex") {
        score = 0;
        recommendations.push(REC_NOINDEX.to_string());
    }
    if has_directive(&directives, "nofollow") {
        recommendations.push(REC_NOFOLLOW.to_string());
    }

    if !signals.has_structured_data {
        recommendations.push(REC_STRUCTURED_DATA.to_string());
    }

    match signals.title.as_deref().map(|t| t.chars().count()) {
        None => recommendations.push(REC_TITLE_MISSING.to_string()),
        Some(len) if len < TITLE_MIN_CHARS => recommendations.push(REC_TITLE_MISSING.to_string()),
        Some(len) if len > TITLE_MAX_CHARS => recommendations.push(REC_TITLE_LONG.to_string()),
        Some(_) => {}
    }

    match signals.meta_description.as_deref().map(|d| d.chars().count()) {
        None => recommendations.push(REC_DESCRIPTION_MISSING.to_string()),
        Some(len) if len < META_DESCRIPTION_MIN_CHARS => {
            recommendations.push(REC_DESCRIPTION_MISSING.to_string())
        }
        Some(len) if len > META_DESCRIPTION_MAX_CHARS => {
            recommendations.push(REC_DESCRIPTION_LONG.to_string())
        }
        Some(_) => {}
    }

    if signals.h1.is_none() {
        recommendations.push(REC_H1_MISSING.to_string());
    }

    SeoAnalysis {
        canonical: signals.canonical,
        robots_tag,
        meta_robots: signals.meta_robots,
        hreflang: signals.hreflang,
        has_structured_data: signals.has_structured_data,
        title: signals.title,
        meta_description: signals.meta_description,
        h1: signals.h1,
        recommendations,
        impact_score: score.clamp(0, 100) as u8,
        link_equity: calculate_link_equity(chain),
    }
}

fn redirect_count_score(chain: &[Hop], recommendations: &mut Vec<String>) -> i32 {
    match chain.len().saturating_sub(1) {
        0 => 100,
        1 => match chain.first().map(|hop| hop.status) {
            Some(301) => 95,
            Some(302) => {
                recommendations.push(REC_PREFER_301.to_string());
                80
            }
            _ => 85,
        },
        2 => {
            recommendations.push(REC_REDUCE_CHAIN.to_string());
            70
        }
        _ => {
            recommendations.push(REC_CONSOLIDATE.to_string());
            50
        }
    }
}

fn has_directive(values: &[Option<&str>], directive: &str) -> bool {
    values
        .iter()
        .flatten()
        .any(|value| value.to_ascii_lowercase().contains(directive))
}

/// Relative canonicals resolve against the terminal URL and are never cross-origin.
fn canonical_is_cross_origin(canonical: &str, final_url: &str) -> bool {
    if canonical == final_url {
        return false;
    }
    let Ok(base) = Url::parse(final_url) else {
        return false;
    };
    match base.join(canonical) {
        Ok(resolved) => resolved.origin() != base.origin(),
        Err(e) => {
            log::debug!("Ignoring unparseable canonical URL '{canonical}': {e}");
            false
        }
    }
}

/// Estimated link equity (percent) reaching each hop of `chain`.
///
/// Starts at 100 and decays per redirect: 301 keeps 99%, 302 keeps 95%, any
/// other status keeps 97%. Meta-refresh and JavaScript hops lose a further 10%.
pub fn calculate_link_equity(chain: &[Hop]) -> Vec<f64> {
    let mut equity = Vec::with_capacity(chain.len());
    let mut current = 100.0_f64;

    for (i, hop) in chain.iter().enumerate() {
        equity.push(current);
        if i + 1 == chain.len() {
            break;
        }
        current *= match hop.status {
            301 => 0.99,
            302 => 0.95,
            _ => 0.97,
        };
        if hop.meta_refresh || hop.redirect_type == RedirectType::Javascript {
            current *= 0.90;
        }
    }

    equity
}
