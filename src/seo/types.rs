//! SEO analysis record types.

use serde::Serialize;

/// A language/region alternate declared with `hreflang`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HreflangLink {
    pub lang: String,
    pub url: String,
}

/// SEO impact of the resolved chain and its terminal page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub robots_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_robots: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hreflang: Vec<HreflangLink>,
    pub has_structured_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h1: Option<String>,
    pub recommendations: Vec<String>,
    /// 0-100
    pub impact_score: u8,
    /// Estimated share of link equity (percent) arriving at each hop
    pub link_equity: Vec<f64>,
}
