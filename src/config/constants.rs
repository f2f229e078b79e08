//! Configuration constants.
//!
//! This module defines the limits, thresholds, and defaults shared by the
//! chain resolver and the analyzers.

// Redirect handling
/// Maximum number of redirect hops to follow after the initial request.
///
/// A chain therefore holds at most `MAX_REDIRECT_HOPS + 1` hops.
pub const MAX_REDIRECT_HOPS: usize = 10;

/// HTTP status codes that indicate a redirect via the `Location` header.
pub const REDIRECT_STATUS_CODES: &[u16] = &[301, 302, 303, 307, 308];

/// Status text of the synthetic hop appended when a URL repeats.
pub const LOOP_DETECTED_STATUS_TEXT: &str = "Redirect loop detected";

/// Status text of the synthetic hop appended when a fetch fails.
pub const FETCH_FAILED_STATUS_TEXT: &str = "Fetch failed";

// Network defaults
/// Transport-level timeout applied by the default HTTP client, in seconds.
///
/// The resolver itself never times out a hop; this only bounds the reqwest client.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via `--user-agent`, `--user-agent-preset`, or a
/// `User-Agent` entry in the request header overrides.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Response and body size limits
/// Maximum response body size in bytes (2MB)
/// Bodies are truncated at this size before redirect and SEO inspection
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Maximum number of response headers kept per hop.
/// Excess headers are dropped with a warning (header bomb protection)
pub const MAX_HEADER_COUNT: usize = 100;

/// Maximum URL length accepted by request validation.
pub const MAX_URL_LENGTH: usize = 2048;

// Security scoring
/// HSTS max-age (one year) below which a medium issue is raised.
pub const HSTS_RECOMMENDED_MAX_AGE: u64 = 31_536_000;

/// Days before certificate expiry at which a warning is attached.
pub const TLS_EXPIRY_WARNING_DAYS: i64 = 30;

// SEO thresholds (character counts)
pub const TITLE_MIN_CHARS: usize = 10;
pub const TITLE_MAX_CHARS: usize = 60;
pub const META_DESCRIPTION_MIN_CHARS: usize = 50;
pub const META_DESCRIPTION_MAX_CHARS: usize = 160;
