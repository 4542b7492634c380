//! URL and batch-parameter validation at the CLI boundary.

use log::warn;

use crate::config::{MAX_BATCH_CONCURRENCY, MAX_BATCH_URLS, MIN_BATCH_CONCURRENCY};
use crate::error_handling::ValidationError;

/// Maximum URL length, matching common browser and server limits.
const MAX_URL_LENGTH: usize = 2048;

/// Validates a URL to scrape.
///
/// The URL must be absolute, use the http or https scheme and have a host.
/// Surrounding whitespace is trimmed; the trimmed URL is returned.
///
/// # Errors
///
/// `MissingUrl` for blank input, `InvalidUrl` for anything unparsable, too
/// long, hostless or on another scheme.
pub fn validate_url(url: &str) -> Result<String, ValidationError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ValidationError::MissingUrl);
    }
    if url.len() > MAX_URL_LENGTH {
        warn!(
            "Rejecting URL exceeding maximum length ({} > {}): {}...",
            url.len(),
            MAX_URL_LENGTH,
            url.chars().take(50).collect::<String>()
        );
        return Err(ValidationError::InvalidUrl(format!(
            "URL longer than {MAX_URL_LENGTH} characters"
        )));
    }

    match url::Url::parse(url) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" if parsed.host_str().is_some_and(|h| !h.is_empty()) => {
                Ok(url.to_string())
            }
            "http" | "https" => Err(ValidationError::InvalidUrl(url.to_string())),
            scheme => {
                warn!("Rejecting unsupported scheme {scheme} for URL: {url}");
                Err(ValidationError::InvalidUrl(url.to_string()))
            }
        },
        Err(_) => Err(ValidationError::InvalidUrl(url.to_string())),
    }
}

/// Validates a batch request: 1 to 20 valid URLs and a concurrency in `[1, 5]`.
///
/// Returns the validated URLs in input order.
pub fn validate_batch(urls: &[String], concurrency: usize) -> Result<Vec<String>, ValidationError> {
    if urls.is_empty() {
        return Err(ValidationError::EmptyBatch);
    }
    if urls.len() > MAX_BATCH_URLS {
        return Err(ValidationError::TooManyUrls {
            provided: urls.len(),
            max: MAX_BATCH_URLS,
        });
    }
    if !(MIN_BATCH_CONCURRENCY..=MAX_BATCH_CONCURRENCY).contains(&concurrency) {
        return Err(ValidationError::ConcurrencyOutOfRange {
            provided: concurrency,
            min: MIN_BATCH_CONCURRENCY,
            max: MAX_BATCH_CONCURRENCY,
        });
    }
    urls.iter().map(|url| validate_url(url)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_http_and_https() {
        assert_eq!(
            validate_url("https://example.com/post?id=1"),
            Ok("https://example.com/post?id=1".to_string())
        );
        assert_eq!(
            validate_url("  http://example.com  "),
            Ok("http://example.com".to_string())
        );
    }

    #[test]
    fn test_validate_url_ipv6_and_port() {
        assert!(validate_url("http://[2001:db8::1]:8080/path").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_blank() {
        assert_eq!(validate_url("   "), Err(ValidationError::MissingUrl));
    }

    #[test]
    fn test_validate_url_rejects_relative_and_garbage() {
        assert!(matches!(
            validate_url("example.com"),
            Err(ValidationError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_url("not a url at all!!!"),
            Err(ValidationError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_validate_url_rejects_other_schemes() {
        assert!(validate_url("ftp://example.com/file").is_err());
        assert!(validate_url("file:///etc/passwd").is_err());
        assert!(validate_url("javascript:alert(1)").is_err());
    }

    #[test]
    fn test_validate_url_rejects_overlong() {
        let url = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert!(validate_url(&url).is_err());
    }

    #[test]
    fn test_validate_batch_limits() {
        let one = vec!["https://a.example/".to_string()];
        assert_eq!(validate_batch(&[], 2), Err(ValidationError::EmptyBatch));

        let many: Vec<String> = (0..21).map(|i| format!("https://a.example/{i}")).collect();
        assert_eq!(
            validate_batch(&many, 2),
            Err(ValidationError::TooManyUrls {
                provided: 21,
                max: 20
            })
        );
        assert_eq!(validate_batch(&many[..20], 2).map(|u| u.len()), Ok(20));

        assert!(matches!(
            validate_batch(&one, 0),
            Err(ValidationError::ConcurrencyOutOfRange { provided: 0, .. })
        ));
        assert!(matches!(
            validate_batch(&one, 6),
            Err(ValidationError::ConcurrencyOutOfRange { provided: 6, .. })
        ));
        assert!(validate_batch(&one, 5).is_ok());
    }

    #[test]
    fn test_validate_batch_reports_first_invalid_url() {
        let urls = vec![
            "https://a.example/".to_string(),
            "nope".to_string(),
            "also bad".to_string(),
        ];
        assert_eq!(
            validate_batch(&urls, 2),
            Err(ValidationError::InvalidUrl("nope".to_string()))
        );
    }
}
