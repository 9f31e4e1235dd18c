//! HTTP client construction and the shared REST wrapper.
//!
//! The HTTP client is rebuilt from the plugin context on every invocation;
//! nothing is cached across runs. Proxy selection follows the process
//! environment (reqwest's default), TLS verification tracks the context's
//! SSL-disable flag, and the timeout bounds each request. Request-level
//! diagnostics go through `tracing` and are enabled by the host's trace
//! setting.

use std::time::Duration;

use anyhow::{Context, Result};
use bx_plugin::PluginContext;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Errors the REST layer distinguishes beyond plain transport failures.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("{method} {url} returned HTTP {status}: {body}")]
    Status {
        method: Method,
        url: String,
        status: u16,
        body: String,
    },
}

/// Build the HTTP client for one plugin invocation.
///
/// TLS certificate verification is disabled if and only if the context
/// reports SSL as disabled. The timeout applies per request. No retries and
/// no pool tuning beyond reqwest defaults.
pub fn new_http_client(context: &dyn PluginContext) -> Result<Client> {
    Client::builder()
        .danger_accept_invalid_certs(context.is_ssl_disabled())
        .timeout(Duration::from_secs(context.http_timeout()))
        .build()
        .context("build http client")
}

/// Build the default header set for one plugin invocation.
///
/// Refreshes the UAA token first and propagates the failure when the refresh
/// does not succeed; the Authorization entry always carries the
/// just-refreshed value. Performs exactly one refresh per call.
pub async fn default_headers(context: &dyn PluginContext) -> Result<HeaderMap> {
    context
        .refresh_uaa_token()
        .await
        .context("refresh UAA token")?;

    let mut headers = HeaderMap::new();
    let token = HeaderValue::from_str(&context.uaa_token())
        .context("UAA token is not a valid header value")?;
    headers.insert(header::AUTHORIZATION, token);
    Ok(headers)
}

#[derive(Debug, Clone)]
/// Shared HTTP client plus the default headers attached to every request.
///
/// Both API clients are built on one `RestClient`, so the token refreshed at
/// construction time is what every outbound request carries.
pub struct RestClient {
    http: Client,
    default_headers: HeaderMap,
}

impl RestClient {
    pub fn new(http: Client, default_headers: HeaderMap) -> Self {
        Self { http, default_headers }
    }

    /// Build a request for a method and absolute URL, carrying the default
    /// header set.
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!(%url, "building request");
        self.http
            .request(method, url)
            .headers(self.default_headers.clone())
    }

    /// GET a URL and deserialize the JSON response body.
    ///
    /// Non-success statuses become [`ApiError::Status`] carrying the body
    /// text for the UI failure path.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.get_json_with(url, HeaderMap::new()).await
    }

    /// Like [`get_json`], with extra per-request headers.
    ///
    /// [`get_json`]: RestClient::get_json
    pub async fn get_json_with<T: DeserializeOwned>(&self, url: &str, extra: HeaderMap) -> Result<T> {
        let response = self
            .request(Method::GET, url)
            .headers(extra)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                method: Method::GET,
                url: url.to_string(),
                status: status.as_u16(),
                body,
            }
            .into());
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("decode response from GET {url}"))
    }
}

/// Join a base URL and an API-relative path.
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct RefreshContext {
        refreshes: AtomicUsize,
        fail_refresh: bool,
        ssl_disabled: bool,
        timeout: u64,
    }

    impl RefreshContext {
        fn new(fail_refresh: bool) -> Self {
            Self {
                refreshes: AtomicUsize::new(0),
                fail_refresh,
                ssl_disabled: false,
                timeout: 10,
            }
        }
    }

    #[async_trait::async_trait]
    impl PluginContext for RefreshContext {
        fn api_endpoint(&self) -> String {
            "https://api.example.com".into()
        }
        fn trace(&self) -> String {
            String::new()
        }
        fn color_enabled(&self) -> bool {
            false
        }
        fn is_ssl_disabled(&self) -> bool {
            self.ssl_disabled
        }
        fn http_timeout(&self) -> u64 {
            self.timeout
        }
        fn locale(&self) -> String {
            "en_US".into()
        }
        fn current_space_guid(&self) -> String {
            "space-guid".into()
        }
        async fn refresh_uaa_token(&self) -> Result<()> {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
            if self.fail_refresh {
                bail!("UAA refused the refresh token");
            }
            Ok(())
        }
        fn uaa_token(&self) -> String {
            "bearer fresh-token".into()
        }
    }

    #[tokio::test]
    async fn default_headers_carries_the_refreshed_token() {
        let ctx = RefreshContext::new(false);
        let headers = default_headers(&ctx).await.unwrap();
        assert_eq!(ctx.refreshes.load(Ordering::SeqCst), 1);
        assert_eq!(
            headers.get(header::AUTHORIZATION).unwrap(),
            "bearer fresh-token"
        );
        assert_eq!(headers.len(), 1);
    }

    #[tokio::test]
    async fn default_headers_propagates_refresh_failure() {
        let ctx = RefreshContext::new(true);
        let err = default_headers(&ctx).await.unwrap_err();
        assert!(err.to_string().contains("refresh UAA token"));
    }

    #[tokio::test]
    async fn default_headers_refreshes_once_per_call() {
        let ctx = RefreshContext::new(false);
        default_headers(&ctx).await.unwrap();
        default_headers(&ctx).await.unwrap();
        assert_eq!(ctx.refreshes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn client_builds_for_both_ssl_settings() {
        for ssl_disabled in [false, true] {
            let ctx = RefreshContext { ssl_disabled, ..RefreshContext::new(false) };
            assert!(new_http_client(&ctx).is_ok());
        }
    }

    #[tokio::test]
    async fn stalled_request_fails_with_a_timeout_error() {
        // Accepts the TCP handshake via the listen backlog but never answers,
        // so the request sits until the client timeout fires.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let ctx = RefreshContext { timeout: 1, ..RefreshContext::new(false) };
        let client = new_http_client(&ctx).unwrap();
        let err = client
            .get(format!("http://{addr}/v2/apps"))
            .send()
            .await
            .unwrap_err();
        assert!(err.is_timeout(), "expected a timeout error, got: {err}");
        drop(listener);
    }

    #[test]
    fn join_url_collapses_trailing_slash() {
        assert_eq!(join_url("https://api.example.com/", "/v2/apps"), "https://api.example.com/v2/apps");
        assert_eq!(join_url("https://api.example.com", "/v2/apps"), "https://api.example.com/v2/apps");
    }
}
