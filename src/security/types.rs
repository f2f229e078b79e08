//! Security analysis record types.

use serde::Serialize;
use strum_macros::Display;

/// Severity of a security issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

/// A scored finding with a suggested fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityIssue {
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub recommendation: String,
}

impl SecurityIssue {
    pub(crate) fn new(
        severity: Severity,
        title: &str,
        description: impl Into<String>,
        recommendation: &str,
    ) -> Self {
        Self {
            severity,
            title: title.to_string(),
            description: description.into(),
            recommendation: recommendation.to_string(),
        }
    }
}

/// Parsed `Strict-Transport-Security` directives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HstsConfig {
    pub max_age: u64,
    pub include_sub_domains: bool,
    pub preload: bool,
}

/// Security headers found on the terminal response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityHeaders {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsts: Option<HstsConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_frame_options: Option<String>,
    /// True only for `X-Content-Type-Options: nosniff`
    pub x_content_type_options: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expect_ct: Option<String>,
}

/// Security-header posture of the terminal hop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityAnalysis {
    /// 0-100
    pub score: u8,
    pub headers: SecurityHeaders,
    pub issues: Vec<SecurityIssue>,
    pub recommendations: Vec<String>,
    pub mixed_content: bool,
}
