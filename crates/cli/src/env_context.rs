//! Environment-backed plugin context.
//!
//! Inside the bx CLI the host hands the plugin its own context over the
//! plugin protocol. When the binary runs standalone, this implementation
//! reads the same settings from `BLUEMIX_*` environment variables instead:
//!
//! - `BLUEMIX_API_ENDPOINT`: primary API base URL (required to run)
//! - `BLUEMIX_TRACE`: "", "false", "true", or a filter directive
//! - `BLUEMIX_COLOR`: colored output, defaults to on
//! - `BLUEMIX_SSL_DISABLED`: skip TLS verification, defaults to off
//! - `BLUEMIX_HTTP_TIMEOUT`: request timeout in seconds
//! - `BLUEMIX_SPACE_GUID`: the targeted space
//! - `BLUEMIX_UAA_TOKEN`: current bearer token
//! - `BLUEMIX_UAA_ENDPOINT` plus `BLUEMIX_UAA_REFRESH_TOKEN`: when both are
//!   set, the token is refreshed against UAA before headers are built

use std::env;
use std::sync::Mutex;

use anyhow::{Context as _, Result};
use bx_plugin::PluginContext;
use serde::Deserialize;
use tracing::debug;

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOCALE: &str = "en_US";

pub struct EnvPluginContext {
    api_endpoint: String,
    trace: String,
    color_enabled: bool,
    ssl_disabled: bool,
    http_timeout: u64,
    locale: String,
    space_guid: String,
    uaa_endpoint: Option<String>,
    refresh_token: Option<String>,
    token: Mutex<String>,
}

impl EnvPluginContext {
    /// Capture the context from the process environment.
    ///
    /// Nothing is validated here; a missing API endpoint surfaces as an
    /// error when a command actually needs it, and the metadata handshake
    /// keeps working in an empty environment.
    pub fn from_env() -> Self {
        Self {
            api_endpoint: env::var("BLUEMIX_API_ENDPOINT").unwrap_or_default(),
            trace: env::var("BLUEMIX_TRACE").unwrap_or_default(),
            color_enabled: env_flag("BLUEMIX_COLOR", true),
            ssl_disabled: env_flag("BLUEMIX_SSL_DISABLED", false),
            http_timeout: env::var("BLUEMIX_HTTP_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
            locale: locale_from_env(),
            space_guid: env::var("BLUEMIX_SPACE_GUID").unwrap_or_default(),
            uaa_endpoint: env::var("BLUEMIX_UAA_ENDPOINT").ok(),
            refresh_token: env::var("BLUEMIX_UAA_REFRESH_TOKEN").ok(),
            token: Mutex::new(normalize_token(
                env::var("BLUEMIX_UAA_TOKEN").unwrap_or_default(),
            )),
        }
    }
}

#[async_trait::async_trait]
impl PluginContext for EnvPluginContext {
    fn api_endpoint(&self) -> String {
        self.api_endpoint.clone()
    }

    fn trace(&self) -> String {
        self.trace.clone()
    }

    fn color_enabled(&self) -> bool {
        self.color_enabled
    }

    fn is_ssl_disabled(&self) -> bool {
        self.ssl_disabled
    }

    fn http_timeout(&self) -> u64 {
        self.http_timeout
    }

    fn locale(&self) -> String {
        self.locale.clone()
    }

    fn current_space_guid(&self) -> String {
        self.space_guid.clone()
    }

    /// Exchange the refresh token for a fresh access token at UAA.
    ///
    /// Without a UAA endpoint and refresh token in the environment the
    /// current token is taken as-is and no network call is made.
    async fn refresh_uaa_token(&self) -> Result<()> {
        let (Some(uaa_endpoint), Some(refresh_token)) =
            (self.uaa_endpoint.as_deref(), self.refresh_token.as_deref())
        else {
            debug!("no UAA refresh configured; keeping current token");
            return Ok(());
        };

        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
            token_type: String,
        }

        let url = format!("{}/oauth/token", uaa_endpoint.trim_end_matches('/'));
        let http = bx_api::new_http_client(self)?;
        let response = http
            .post(&url)
            .basic_auth("cf", Some(""))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await
            .with_context(|| format!("POST {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("UAA token refresh returned HTTP {status}: {body}");
        }

        let token: TokenResponse = response
            .json()
            .await
            .context("decode UAA token response")?;
        *self.token.lock().unwrap() = format!("{} {}", token.token_type, token.access_token);
        Ok(())
    }

    fn uaa_token(&self) -> String {
        self.token.lock().unwrap().clone()
    }
}

/// Read a boolean environment flag, treating "1", "true", and "yes" as set.
fn env_flag(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(value) => matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"),
        Err(_) => default,
    }
}

/// `BLUEMIX_LOCALE` wins; otherwise the language part of `LANG`.
fn locale_from_env() -> String {
    if let Ok(locale) = env::var("BLUEMIX_LOCALE") {
        return locale;
    }
    env::var("LANG")
        .ok()
        .and_then(|lang| lang.split('.').next().map(str::to_string))
        .filter(|l| !l.is_empty() && l != "C" && l != "POSIX")
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}

/// Ensure a non-empty token carries the "bearer " prefix the API expects.
fn normalize_token(token: String) -> String {
    if token.is_empty() || token.to_ascii_lowercase().starts_with("bearer ") {
        token
    } else {
        format!("bearer {token}")
    }
}
