//! Security header analysis.
//!
//! This module scores the security-header posture of the terminal response:
//! - HSTS presence and max-age
//! - Content-Security-Policy presence and strength
//! - X-Frame-Options, X-Content-Type-Options
//! - Referrer-Policy, Permissions-Policy
//!
//! and folds in mixed content (HTTPS followed by HTTP) across the chain.

mod analysis;
mod types;

pub use analysis::{
    analyze_security_headers, apply_mixed_content, detect_mixed_content,
    extract_security_headers, parse_hsts,
};
pub use types::{HstsConfig, SecurityAnalysis, SecurityHeaders, SecurityIssue, Severity};
