//! The ListPlugin: metadata descriptor, per-run initialization, dispatch.

use std::str::FromStr;

use anyhow::{Context as _, Result, bail, ensure};
use bx_api::{
    CcClient, CloudControllerApi, ContainerApi, ContainerClient, RestClient, container_endpoint,
    default_headers, new_http_client,
};
use bx_plugin::{CommandMetadata, Plugin, PluginContext, PluginMetadata, RunConfig, Version};

use crate::commands::ListCommand;
use crate::ui::{StdUi, Ui};

/// The plugin this binary exposes to the bx CLI host.
pub struct ListPlugin;

/// Subcommands this plugin owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Subcommand {
    List,
}

impl FromStr for Subcommand {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "list" => Ok(Subcommand::List),
            other => bail!("unknown command '{other}'; usage: bx list"),
        }
    }
}

#[async_trait::async_trait]
impl Plugin for ListPlugin {
    fn metadata(&self) -> PluginMetadata {
        PluginMetadata {
            name: "bx-list".to_string(),
            version: Version { major: 0, minor: 0, build: 1 },
            commands: vec![CommandMetadata {
                name: "list".to_string(),
                description: "List your apps, containers and services in the target space"
                    .to_string(),
                usage: "bx list".to_string(),
            }],
        }
    }

    async fn run(&self, context: &dyn PluginContext, args: &[String]) -> Result<()> {
        let config = RunConfig::from_context(context);
        config.init_tracing();

        let ui = StdUi::new(config.color_enabled);
        match run_inner(&ui, context, args).await {
            Ok(()) => Ok(()),
            Err(err) => {
                ui.failed(&format!("{err:#}"));
                Err(err)
            }
        }
    }
}

/// Everything after per-run initialization; any error routes through the UI
/// failure path in [`Plugin::run`] above.
async fn run_inner(ui: &dyn Ui, context: &dyn PluginContext, args: &[String]) -> Result<()> {
    let api_endpoint = context.api_endpoint();
    ensure!(
        !api_endpoint.is_empty(),
        "no API endpoint configured; set BLUEMIX_API_ENDPOINT or target an endpoint in the host CLI"
    );

    let rest = RestClient::new(new_http_client(context)?, default_headers(context).await?);
    let cc = CcClient::new(api_endpoint.clone(), rest.clone());
    let containers = ContainerClient::new(container_endpoint(&api_endpoint), rest);

    dispatch(ui, context, &cc, &containers, args).await
}

/// Select and invoke the command handler named by the first argument.
pub(crate) async fn dispatch(
    ui: &dyn Ui,
    context: &dyn PluginContext,
    cc: &dyn CloudControllerApi,
    containers: &dyn ContainerApi,
    args: &[String],
) -> Result<()> {
    let name = args.first().context("no command given; usage: bx list")?;
    match name.parse::<Subcommand>()? {
        Subcommand::List => {
            ListCommand::new(ui, context, cc, containers)
                .run(&args[1..])
                .await
        }
    }
}
