//! Containers-api endpoint derivation.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches an HTTP(S) base URL with at least one dot-separated domain label.
static ENDPOINT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(^https?://)?[^.]+(\..+)+").unwrap()
});

/// Derive the containers-api endpoint from the primary API endpoint.
///
/// The first domain label is replaced with `containers-api`; scheme, the
/// remaining labels, port, and path are preserved. Endpoints without a
/// dot-separated suffix (e.g. `https://localhost`) are returned unchanged.
///
/// ```
/// use bx_api::container_endpoint;
///
/// assert_eq!(
///     container_endpoint("https://api.example.com"),
///     "https://containers-api.example.com"
/// );
/// assert_eq!(container_endpoint("https://localhost"), "https://localhost");
/// ```
pub fn container_endpoint(api_endpoint: &str) -> String {
    ENDPOINT_RE
        .replace_all(api_endpoint, "${1}containers-api${2}")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_first_label_after_scheme() {
        assert_eq!(
            container_endpoint("https://api.example.com"),
            "https://containers-api.example.com"
        );
        assert_eq!(
            container_endpoint("http://api.eu-gb.bluemix.net"),
            "http://containers-api.eu-gb.bluemix.net"
        );
    }

    #[test]
    fn works_without_a_scheme() {
        assert_eq!(container_endpoint("api.example.com"), "containers-api.example.com");
    }

    #[test]
    fn preserves_port_and_path() {
        assert_eq!(
            container_endpoint("https://api.example.com:8443/v2"),
            "https://containers-api.example.com:8443/v2"
        );
    }

    #[test]
    fn bare_host_passes_through() {
        assert_eq!(container_endpoint("https://localhost"), "https://localhost");
        assert_eq!(container_endpoint("localhost"), "localhost");
    }

    #[test]
    fn empty_input_passes_through() {
        assert_eq!(container_endpoint(""), "");
    }
}
