// src/core/scanner/headers_fetcher.rs

use crate::config::Settings;
use crate::core::error::FetchError;
use crate::core::models::ResponseHeaders;
use reqwest::header::HeaderMap;
use tracing::{debug, error, info, warn};
use url::Url;

/// Turns user input ("example.com", "http://example.com/path") into an absolute URL.
///
/// Input without a scheme is assumed to be HTTPS. Any scheme other than
/// `http` or `https` is rejected.
pub fn normalize_target(input: &str) -> Result<Url, FetchError> {
    let trimmed = input.trim();
    let invalid = |reason: &str| FetchError::InvalidUrl {
        input: input.to_string(),
        reason: reason.to_string(),
    };
    if trimmed.is_empty() {
        return Err(invalid("empty target"));
    }

    let with_scheme = match explicit_scheme(trimmed) {
        Some(scheme) if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") => {
            trimmed.to_string()
        }
        Some(_) => return Err(invalid("unsupported scheme")),
        None => format!("https://{}", trimmed),
    };

    let url = Url::parse(&with_scheme).map_err(|e| invalid(&e.to_string()))?;
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(invalid("missing host")),
    }
}

/// The `<scheme>` of a leading `<scheme>://`, if the input starts with one.
fn explicit_scheme(input: &str) -> Option<&str> {
    let (scheme, _) = input.split_once("://")?;
    let mut chars = scheme.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let valid = starts_with_letter && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(scheme)
}

/// Converts a `reqwest` header map into the analyzer's case-insensitive mapping.
///
/// Repeated headers are kept in arrival order. Values that are not valid UTF-8
/// are decoded lossily rather than dropped, so the header still counts as sent.
pub fn collect_headers(map: &HeaderMap) -> ResponseHeaders {
    let mut headers = ResponseHeaders::new();
    for (name, value) in map.iter() {
        match value.to_str() {
            Ok(s) => headers.insert(name.as_str(), s),
            Err(_) => {
                warn!(header_name = name.as_str(), "Header contained invalid UTF-8.");
                headers.insert(name.as_str(), &String::from_utf8_lossy(value.as_bytes()));
            }
        }
    }
    headers
}

pub fn build_client(settings: &Settings) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .user_agent(settings.user_agent.as_str())
        .timeout(settings.request_timeout)
        .build()
        .map_err(|e| {
            error!(error = %e, "Failed to build HTTP client.");
            FetchError::Client(e)
        })
}

/// Sends a GET request to `url` and returns the final response's headers.
///
/// Redirects are followed. Transport failures and non-2xx final statuses are
/// errors; nothing partial is returned.
pub async fn fetch_headers(client: &reqwest::Client, url: &Url) -> Result<ResponseHeaders, FetchError> {
    info!(url = %url, "Fetching response headers.");

    let response = client.get(url.clone()).send().await.map_err(|e| {
        error!(url = %url, error = %e, "HTTP request failed.");
        FetchError::Request {
            url: url.to_string(),
            source: e,
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        warn!(url = %url, %status, "Target responded with a non-success status.");
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    let headers = collect_headers(response.headers());
    debug!(url = %url, final_url = %response.url(), count = headers.len(), "Headers received.");
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderName, HeaderValue};

    #[test]
    fn bare_domain_gets_https() {
        let url = normalize_target("example.com").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn explicit_scheme_is_kept() {
        let url = normalize_target("  http://example.com/login ").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.path(), "/login");
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(normalize_target(""), Err(FetchError::InvalidUrl { .. })));
        assert!(matches!(normalize_target("https://"), Err(FetchError::InvalidUrl { .. })));
        assert!(matches!(normalize_target("exa mple.com"), Err(FetchError::InvalidUrl { .. })));
        assert!(matches!(normalize_target("ftp://example.com"), Err(FetchError::InvalidUrl { .. })));
        assert!(matches!(normalize_target("file:///etc/passwd"), Err(FetchError::InvalidUrl { .. })));
    }

    #[test]
    fn scheme_match_ignores_case_and_later_separators() {
        assert_eq!(normalize_target("HTTPS://Example.com").unwrap().as_str(), "https://example.com/");
        let url = normalize_target("example.com/go?to=ftp://other.example").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn header_map_conversion_joins_repeats_and_keeps_invalid_bytes() {
        let mut map = HeaderMap::new();
        map.append("content-security-policy", HeaderValue::from_static("default-src 'self'"));
        map.append("content-security-policy", HeaderValue::from_static("object-src 'none'"));
        map.insert(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_bytes(b"DENY\xff").unwrap(),
        );

        let headers = collect_headers(&map);
        assert_eq!(
            headers.get("Content-Security-Policy"),
            Some("default-src 'self', object-src 'none'")
        );
        assert!(headers.get("x-frame-options").unwrap().starts_with("DENY"));
    }
}
