//! The bx-list plugin binary.
//!
//! Invoked by the bx CLI host with the raw argument list, or with
//! `--metadata` to query the plugin descriptor. Outside the host it can be
//! run directly against the `BLUEMIX_*` environment (see
//! [`env_context::EnvPluginContext`]).

use std::process;

mod commands;
mod env_context;
mod plugin;
mod ui;

use env_context::EnvPluginContext;
use plugin::ListPlugin;

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let context = EnvPluginContext::from_env();
    let code = bx_plugin::start(&ListPlugin, &context, &args).await;
    process::exit(code);
}
