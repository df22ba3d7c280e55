//! Structural validation of normalized URLs.
//!
//! Checks scheme, hostname shape and TLD membership. Name resolution is a
//! separate step (see [`crate::application::services::DomainChecker`]).

use url::Url;

use crate::utils::tld_registry::TldRegistry;

/// Hosts that bypass TLD, label and DNS checks so local targets can be
/// shortened during development.
pub fn is_local_host(hostname: &str) -> bool {
    hostname == "localhost" || hostname == "127.0.0.1" || hostname.ends_with(".local")
}

/// Parses `url` and returns its hostname, if it has one.
///
/// Hostnames are returned the way the `url` crate serializes them:
/// lower-cased, with internationalized labels in punycode.
pub fn extract_hostname(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .filter(|host| !host.is_empty())
}

/// Returns true if `url` is a well-formed web address with a recognized TLD.
///
/// # Rules
///
/// Applied in order, all must pass:
///
/// 1. Scheme is `http` or `https`
/// 2. Hostname is non-empty
/// 3. `localhost`, `127.0.0.1` and `*.local` are accepted immediately
/// 4. Hostname contains at least one dot
/// 5. The last label, lower-cased, is at least 2 characters and in `tlds`
/// 6. Hostname characters are limited to `[A-Za-z0-9.-]`
/// 7. No label is empty or starts/ends with a hyphen
pub fn is_valid_url_format(url: &str, tlds: &TldRegistry) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };

    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }

    let Some(hostname) = parsed.host_str().filter(|h| !h.is_empty()) else {
        return false;
    };

    if is_local_host(hostname) {
        return true;
    }

    if !hostname.contains('.') {
        return false;
    }

    let labels: Vec<&str> = hostname.split('.').collect();
    let tld = labels
        .last()
        .map(|label| label.to_ascii_lowercase())
        .unwrap_or_default();

    if tld.len() < 2 || !tlds.contains(&tld) {
        return false;
    }

    if !hostname
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return false;
    }

    labels
        .iter()
        .all(|label| !label.is_empty() && !label.starts_with('-') && !label.ends_with('-'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::url_normalizer::normalize_url;

    fn valid(url: &str) -> bool {
        is_valid_url_format(url, &TldRegistry::default())
    }

    #[test]
    fn test_accepts_plain_domains() {
        assert!(valid("https://example.com"));
        assert!(valid("http://example.org/path?q=1#frag"));
        assert!(valid("https://sub.domain.example.co/a/b"));
        assert!(valid("https://EXAMPLE.COM"));
    }

    #[test]
    fn test_accepts_hyphenated_labels() {
        assert!(valid("https://my-site.example.com"));
    }

    #[test]
    fn test_accepts_local_hosts() {
        assert!(valid("http://localhost:3000/test"));
        assert!(valid("http://127.0.0.1:8080"));
        assert!(valid("https://printer.local/status"));
    }

    #[test]
    fn test_rejects_unparseable() {
        assert!(!valid("https://not a domain"));
        assert!(!valid("https://"));
        assert!(!valid("just text"));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        assert!(!valid("ftp://example.com/file.txt"));
        assert!(!valid("mailto:someone@example.com"));
        assert!(!valid("javascript:alert(1)"));
    }

    #[test]
    fn test_rejects_bare_hostname() {
        assert!(!valid("https://intranet"));
    }

    #[test]
    fn test_rejects_unknown_tld() {
        assert!(!valid("https://example.con"));
        assert!(!valid("http://totally-bogus-domain-xyz123.invalid"));
    }

    #[test]
    fn test_rejects_short_tld() {
        assert!(!valid("https://example.c"));
    }

    #[test]
    fn test_rejects_ip_addresses_other_than_loopback() {
        assert!(!valid("http://192.168.1.1/admin"));
        assert!(!valid("http://[::1]:8080"));
    }

    #[test]
    fn test_rejects_bad_labels() {
        assert!(!valid("https://-example.com"));
        assert!(!valid("https://example-.com"));
        assert!(!valid("https://a..example.com"));
        assert!(!valid("https://example.com."));
    }

    #[test]
    fn test_rejects_underscore_in_hostname() {
        assert!(!valid("https://my_site.example.com"));
    }

    #[test]
    fn test_punycode_hostname_is_ascii() {
        assert!(valid("https://münchen.de"));
    }

    #[test]
    fn test_custom_registry() {
        let registry = TldRegistry::from_entries(["invalid"]);
        assert!(is_valid_url_format(
            "http://totally-bogus-domain-xyz123.invalid",
            &registry
        ));
        assert!(!is_valid_url_format("https://example.com", &registry));
    }

    #[test]
    fn test_accepted_hosts_have_registered_tld_or_are_local() {
        let registry = TldRegistry::default();
        let inputs = [
            "example.com",
            "localhost",
            "127.0.0.1",
            "box.local",
            "http://a.b.c.io/x",
            "example.con",
            "sub.example.uk",
            "intranet",
            "https://docs.google.com/document/d/abc",
            "weird_host.org",
            "192.168.0.1",
        ];

        for input in inputs {
            let url = normalize_url(input);
            if !is_valid_url_format(&url, &registry) {
                continue;
            }
            let host = extract_hostname(&url).expect("accepted URL has a host");
            let tld = host.rsplit('.').next().unwrap_or_default();
            assert!(
                is_local_host(&host) || registry.contains(tld),
                "{input} accepted with unregistered TLD"
            );
        }
    }

    #[test]
    fn test_extract_hostname() {
        assert_eq!(
            extract_hostname("https://Docs.Google.com/document/d/x"),
            Some("docs.google.com".to_string())
        );
        assert_eq!(extract_hostname("not a url"), None);
    }

    #[test]
    fn test_is_local_host() {
        assert!(is_local_host("localhost"));
        assert!(is_local_host("127.0.0.1"));
        assert!(is_local_host("nas.local"));
        assert!(!is_local_host("localhost.com"));
        assert!(!is_local_host("127.0.0.2"));
    }
}
