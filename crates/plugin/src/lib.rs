//! Plugin lifecycle contract for bx CLI plugins.
//!
//! A plugin exposes two things to the host runtime:
//!
//! - an immutable [`PluginMetadata`] descriptor (name, version, commands),
//!   queried before the plugin is ever run, and
//! - a [`Plugin::run`] entry point invoked with the raw argument list, where
//!   the first element names the subcommand.
//!
//! The host supplies a [`PluginContext`] capability object carrying the API
//! endpoint, trace/color preferences, and the UAA token session. Plugins read
//! the context; they never own or mutate it.
//!
//! The [`start`] helper drives the whole handshake for a plugin binary:
//! answer the metadata query, or initialize per-run state and dispatch into
//! the plugin, mapping the outcome to a process exit code.

use anyhow::Result;
use serde::{Deserialize, Serialize};

mod config;
mod context;

pub use config::RunConfig;
pub use context::PluginContext;

/// Semantic version of a plugin, as reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.build)
    }
}

/// Descriptor for a single command a plugin contributes to the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// Subcommand name as typed by the user (e.g. "list").
    pub name: String,
    /// One-line description shown in help output.
    pub description: String,
    /// Invocation string shown in usage output (e.g. "bx list").
    pub usage: String,
}

/// Immutable plugin descriptor returned from [`Plugin::metadata`].
///
/// The host queries this before any run to learn which commands the plugin
/// owns. It must be constant for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginMetadata {
    pub name: String,
    pub version: Version,
    pub commands: Vec<CommandMetadata>,
}

/// A bx CLI plugin.
///
/// `metadata` must be pure and callable at any time, including before any
/// initialization. `run` is invoked at most once per process; the argument
/// slice is the raw argv tail, with the subcommand name first.
#[async_trait::async_trait]
pub trait Plugin: Send + Sync {
    /// Return the immutable plugin descriptor.
    fn metadata(&self) -> PluginMetadata;

    /// Execute the plugin against the host-supplied context.
    ///
    /// Implementations report failures through their own UI before returning
    /// the error; the caller only translates the outcome into an exit code.
    async fn run(&self, context: &dyn PluginContext, args: &[String]) -> Result<()>;
}

/// Argument the host passes to query the metadata descriptor.
pub const METADATA_ARG: &str = "--metadata";

/// Drive a plugin binary: answer the metadata handshake or run the plugin.
///
/// Returns the process exit code: 0 on success (or a metadata query), 1 when
/// the run produced an error. Per-run state (tracing, color) is the plugin's
/// to initialize inside `run`; the error itself is expected to have been
/// reported through the plugin's UI already, so here it is only traced.
pub async fn start(plugin: &dyn Plugin, context: &dyn PluginContext, args: &[String]) -> i32 {
    if args.first().map(String::as_str) == Some(METADATA_ARG) {
        match serde_json::to_string_pretty(&plugin.metadata()) {
            Ok(json) => {
                println!("{json}");
                return 0;
            }
            Err(err) => {
                eprintln!("failed to serialize plugin metadata: {err}");
                return 1;
            }
        }
    }

    match plugin.run(context, args).await {
        Ok(()) => 0,
        Err(err) => {
            tracing::debug!(error = %err, "plugin run failed");
            1
        }
    }
}
