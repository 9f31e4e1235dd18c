//! Per-run configuration derived from the plugin context.
//!
//! The original CLI SDK kept trace, color, and locale state in process-wide
//! globals. Here the same state is captured once at the start of a run in an
//! explicit [`RunConfig`] and handed to whichever component needs it.

use crate::PluginContext;

/// Cross-cutting state for one plugin run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Filter directive for the tracing subscriber.
    pub trace_filter: String,
    /// Whether output may use terminal colors.
    pub color_enabled: bool,
    /// User locale, for translation lookups.
    pub locale: String,
}

impl RunConfig {
    /// Capture trace, color, and locale settings from the context.
    ///
    /// The trace setting maps as the host does: "true" enables debug-level
    /// tracing, "" or "false" leaves it at errors only, and anything else is
    /// passed through as a filter directive.
    pub fn from_context(context: &dyn PluginContext) -> Self {
        let trace_filter = match context.trace().trim() {
            "" | "false" => "error".to_string(),
            "true" => "debug".to_string(),
            custom => custom.to_string(),
        };
        Self {
            trace_filter,
            color_enabled: context.color_enabled(),
            locale: context.locale(),
        }
    }

    /// Install the global tracing subscriber for this run.
    ///
    /// `RUST_LOG` wins over the context's trace setting when set. Calling
    /// this more than once is harmless; later installs are ignored.
    pub fn init_tracing(&self) {
        let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| self.trace_filter.clone());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    struct TraceContext(&'static str);

    #[async_trait::async_trait]
    impl PluginContext for TraceContext {
        fn api_endpoint(&self) -> String {
            "https://api.example.com".into()
        }
        fn trace(&self) -> String {
            self.0.into()
        }
        fn color_enabled(&self) -> bool {
            true
        }
        fn is_ssl_disabled(&self) -> bool {
            false
        }
        fn http_timeout(&self) -> u64 {
            5
        }
        fn locale(&self) -> String {
            "fr_FR".into()
        }
        fn current_space_guid(&self) -> String {
            "space-guid".into()
        }
        async fn refresh_uaa_token(&self) -> Result<()> {
            Ok(())
        }
        fn uaa_token(&self) -> String {
            "bearer t".into()
        }
    }

    #[test]
    fn trace_true_maps_to_debug() {
        let cfg = RunConfig::from_context(&TraceContext("true"));
        assert_eq!(cfg.trace_filter, "debug");
    }

    #[test]
    fn trace_off_maps_to_error() {
        assert_eq!(RunConfig::from_context(&TraceContext("")).trace_filter, "error");
        assert_eq!(RunConfig::from_context(&TraceContext("false")).trace_filter, "error");
    }

    #[test]
    fn custom_trace_passes_through() {
        let cfg = RunConfig::from_context(&TraceContext("bx_api=trace"));
        assert_eq!(cfg.trace_filter, "bx_api=trace");
    }

    #[test]
    fn color_and_locale_are_captured() {
        let cfg = RunConfig::from_context(&TraceContext("true"));
        assert!(cfg.color_enabled);
        assert_eq!(cfg.locale, "fr_FR");
    }
}
