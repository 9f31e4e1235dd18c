//! Host-supplied capability object.

use anyhow::Result;

/// Configuration and session accessors the host exposes to a plugin.
///
/// The host owns the concrete implementation; plugins depend only on this
/// trait. All accessors reflect the host's current target (API endpoint,
/// space) and preferences (trace, color, SSL, timeout) at invocation time.
#[async_trait::async_trait]
pub trait PluginContext: Send + Sync {
    /// Base URL of the primary platform API.
    fn api_endpoint(&self) -> String;

    /// Trace setting: "", "false", "true", or a custom filter directive.
    fn trace(&self) -> String;

    /// Whether the user asked for colored output.
    fn color_enabled(&self) -> bool;

    /// Whether TLS certificate verification is disabled.
    fn is_ssl_disabled(&self) -> bool;

    /// HTTP request timeout in seconds.
    fn http_timeout(&self) -> u64;

    /// User locale (e.g. "en_US").
    fn locale(&self) -> String;

    /// GUID of the currently targeted space.
    fn current_space_guid(&self) -> String;

    /// Refresh the UAA token. May perform network I/O; failures propagate
    /// to the caller. After a successful refresh, [`uaa_token`] returns the
    /// new value.
    ///
    /// [`uaa_token`]: PluginContext::uaa_token
    async fn refresh_uaa_token(&self) -> Result<()>;

    /// The current UAA bearer token, including the "bearer " prefix.
    fn uaa_token(&self) -> String;
}
