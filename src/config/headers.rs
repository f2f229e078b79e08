//! HTTP header name constants.
//!
//! Header maps are normalized to lower-case names before analysis, so every
//! constant here is lower-case.

// Redirect handling
/// Location header (HTTP redirect target)
pub const HEADER_LOCATION: &str = "location";
/// Link header (may carry `rel=canonical`)
pub const HEADER_LINK: &str = "link";

// Security headers
/// HTTP Strict Transport Security header
pub const HEADER_STRICT_TRANSPORT_SECURITY: &str = "strict-transport-security";
/// Content Security Policy header
pub const HEADER_CONTENT_SECURITY_POLICY: &str = "content-security-policy";
/// X-Frame-Options header
pub const HEADER_X_FRAME_OPTIONS: &str = "x-frame-options";
/// X-Content-Type-Options header
pub const HEADER_X_CONTENT_TYPE_OPTIONS: &str = "x-content-type-options";
/// Referrer-Policy header
pub const HEADER_REFERRER_POLICY: &str = "referrer-policy";
/// Permissions-Policy header
pub const HEADER_PERMISSIONS_POLICY: &str = "permissions-policy";
/// Expect-CT header
pub const HEADER_EXPECT_CT: &str = "expect-ct";

// Infrastructure/Server identification
/// Server header (identifies server software)
pub const HEADER_SERVER: &str = "server";
/// X-Powered-By header (identifies server framework)
pub const HEADER_X_POWERED_BY: &str = "x-powered-by";
/// X-AspNet-Version header
pub const HEADER_X_ASPNET_VERSION: &str = "x-aspnet-version";
/// X-Drupal-Cache header
pub const HEADER_X_DRUPAL_CACHE: &str = "x-drupal-cache";
/// X-Nextjs-Cache header
pub const HEADER_X_NEXTJS_CACHE: &str = "x-nextjs-cache";

// Content
/// Content-Encoding header (compression)
pub const HEADER_CONTENT_ENCODING: &str = "content-encoding";
/// Content-Length header
pub const HEADER_CONTENT_LENGTH: &str = "content-length";
/// Content-Type header
pub const HEADER_CONTENT_TYPE: &str = "content-type";

// SEO
/// X-Robots-Tag header
pub const HEADER_X_ROBOTS_TAG: &str = "x-robots-tag";
