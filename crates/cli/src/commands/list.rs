//! The `list` command: apps, containers, and services in the target space.

use anyhow::{Result, bail};
use bx_api::{App, CloudControllerApi, Container, ContainerApi, ServiceInstance};
use bx_plugin::PluginContext;

use crate::ui::Ui;

/// Handler for `bx list`.
pub struct ListCommand<'a> {
    ui: &'a dyn Ui,
    context: &'a dyn PluginContext,
    cc: &'a dyn CloudControllerApi,
    containers: &'a dyn ContainerApi,
}

impl<'a> ListCommand<'a> {
    pub fn new(
        ui: &'a dyn Ui,
        context: &'a dyn PluginContext,
        cc: &'a dyn CloudControllerApi,
        containers: &'a dyn ContainerApi,
    ) -> Self {
        Self { ui, context, cc, containers }
    }

    /// Fetch and render the three inventories, in order: apps, containers,
    /// service instances. The first failing fetch aborts the run.
    pub async fn run(&self, args: &[String]) -> Result<()> {
        if !args.is_empty() {
            bail!("'list' takes no arguments; usage: bx list");
        }

        let space_guid = self.context.current_space_guid();
        self.ui
            .say("Listing apps, containers and services in the target space...");

        let apps = self.cc.apps_in_space(&space_guid).await?;
        self.render_apps(&apps);

        let containers = self.containers.containers(&space_guid).await?;
        self.render_containers(&containers);

        let services = self.cc.service_instances_in_space(&space_guid).await?;
        self.render_services(&services);

        self.ui.ok();
        Ok(())
    }

    fn render_apps(&self, apps: &[App]) {
        self.ui.say("");
        self.ui.say("Applications:");
        if apps.is_empty() {
            self.ui.say("No applications found.");
            return;
        }
        let rows: Vec<Vec<String>> = apps
            .iter()
            .map(|app| {
                vec![
                    app.name.clone(),
                    app.state.clone(),
                    app.instances.to_string(),
                    format!("{}M", app.memory_mb),
                    app.urls.join(", "),
                ]
            })
            .collect();
        self.ui
            .print_table(&["Name", "State", "Instances", "Memory", "URLs"], &rows);
    }

    fn render_containers(&self, containers: &[Container]) {
        self.ui.say("");
        self.ui.say("Containers:");
        if containers.is_empty() {
            self.ui.say("No containers found.");
            return;
        }
        let rows: Vec<Vec<String>> = containers
            .iter()
            .map(|c| {
                vec![
                    c.name.clone(),
                    c.image.clone(),
                    c.state.clone(),
                    c.created.to_string(),
                ]
            })
            .collect();
        self.ui
            .print_table(&["Name", "Image", "State", "Created"], &rows);
    }

    fn render_services(&self, services: &[ServiceInstance]) {
        self.ui.say("");
        self.ui.say("Services:");
        if services.is_empty() {
            self.ui.say("No services found.");
            return;
        }
        let rows: Vec<Vec<String>> = services
            .iter()
            .map(|s| {
                vec![
                    s.name.clone(),
                    s.service.clone().unwrap_or_else(|| "user-provided".to_string()),
                    s.service_plan.clone().unwrap_or_default(),
                ]
            })
            .collect();
        self.ui.print_table(&["Name", "Service", "Plan"], &rows);
    }
}
