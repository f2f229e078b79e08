//! URL validation and normalization.

use log::warn;
use url::Url;

use crate::config::MAX_URL_LENGTH;
use crate::error_handling::ValidationError;

/// Validates the starting URL of an inspection request.
///
/// The URL must parse on its own, use http or https, and be at most
/// `MAX_URL_LENGTH` bytes long.
///
/// # Errors
///
/// Returns a [`ValidationError`] describing the first problem found.
pub fn validate_url(raw: &str) -> Result<Url, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingUrl);
    }
    if raw.len() > MAX_URL_LENGTH {
        return Err(ValidationError::UrlTooLong {
            length: raw.len(),
            max: MAX_URL_LENGTH,
        });
    }

    let parsed = Url::parse(raw).map_err(|e| ValidationError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(ValidationError::UnsupportedScheme(other.to_string())),
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(ValidationError::InvalidUrl {
            url: raw.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(parsed)
}

/// Like [`validate_url`], but first prepends `https://` when no scheme is given.
///
/// Used for command-line input, where `example.com` is a reasonable argument.
pub fn validate_and_normalize_url(raw: &str) -> Result<Url, ValidationError> {
    let trimmed = raw.trim();
    let normalized = if trimmed.is_empty() || trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    validate_url(&normalized).inspect_err(|e| {
        let preview: String = trimmed.chars().take(50).collect();
        warn!("Rejecting URL {preview}: {e}");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_http_and_https() {
        assert_eq!(
            validate_url("https://example.com").map(String::from),
            Ok("https://example.com/".to_string())
        );
        assert!(validate_url("http://example.com:8080/path?q=1").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_missing() {
        assert_eq!(validate_url("   "), Err(ValidationError::MissingUrl));
    }

    #[test]
    fn test_validate_url_rejects_unsupported_scheme() {
        assert_eq!(
            validate_url("ftp://example.com"),
            Err(ValidationError::UnsupportedScheme("ftp".to_string()))
        );
        assert!(matches!(
            validate_url("mailto:someone@example.com"),
            Err(ValidationError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_validate_url_rejects_relative() {
        assert!(matches!(
            validate_url("example.com/path"),
            Err(ValidationError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_validate_url_rejects_too_long() {
        let long = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert!(matches!(
            validate_url(&long),
            Err(ValidationError::UrlTooLong { max: MAX_URL_LENGTH, .. })
        ));
    }

    #[test]
    fn test_normalize_adds_https() {
        assert_eq!(
            validate_and_normalize_url("example.com").map(String::from),
            Ok("https://example.com/".to_string())
        );
        assert_eq!(
            validate_and_normalize_url("example.com:8080/path?query=value").map(String::from),
            Ok("https://example.com:8080/path?query=value".to_string())
        );
    }

    #[test]
    fn test_normalize_preserves_explicit_scheme() {
        assert_eq!(
            validate_and_normalize_url("http://example.com").map(String::from),
            Ok("http://example.com/".to_string())
        );
        assert!(validate_and_normalize_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(validate_and_normalize_url("not a url at all!!!").is_err());
    }
}
