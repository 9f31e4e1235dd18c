//! Cloud Controller client: apps and service instances in a space.

use anyhow::Result;
use serde::Deserialize;

use crate::client::{RestClient, join_url};

/// An application row as rendered by the `list` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    pub name: String,
    pub state: String,
    pub instances: u32,
    pub memory_mb: u64,
    pub urls: Vec<String>,
}

/// A service instance row, with its plan and offering when the API embeds
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInstance {
    pub name: String,
    pub service_plan: Option<String>,
    pub service: Option<String>,
}

/// Read side of the Cloud Controller used by the `list` command.
#[async_trait::async_trait]
pub trait CloudControllerApi: Send + Sync {
    async fn apps_in_space(&self, space_guid: &str) -> Result<Vec<App>>;
    async fn service_instances_in_space(&self, space_guid: &str) -> Result<Vec<ServiceInstance>>;
}

/// Cloud Controller v2 client.
#[derive(Debug, Clone)]
pub struct CcClient {
    base_url: String,
    rest: RestClient,
}

impl CcClient {
    pub fn new(base_url: String, rest: RestClient) -> Self {
        Self { base_url, rest }
    }
}

// CC v2 wire shapes. Only the entity fields the list command renders are
// modeled; everything else in the payload is ignored.

#[derive(Debug, Deserialize)]
struct ResourceList<T> {
    resources: Vec<Resource<T>>,
}

#[derive(Debug, Deserialize)]
struct Resource<T> {
    entity: T,
}

#[derive(Debug, Deserialize)]
struct AppEntity {
    name: String,
    state: String,
    #[serde(default)]
    instances: u32,
    #[serde(default)]
    memory: u64,
    #[serde(default)]
    urls: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ServiceInstanceEntity {
    name: String,
    service_plan: Option<Resource<ServicePlanEntity>>,
}

#[derive(Debug, Deserialize)]
struct ServicePlanEntity {
    name: String,
    service: Option<Resource<ServiceEntity>>,
}

#[derive(Debug, Deserialize)]
struct ServiceEntity {
    label: String,
}

#[async_trait::async_trait]
impl CloudControllerApi for CcClient {
    async fn apps_in_space(&self, space_guid: &str) -> Result<Vec<App>> {
        let url = join_url(
            &self.base_url,
            &format!("/v2/apps?q=space_guid:{space_guid}"),
        );
        let list: ResourceList<AppEntity> = self.rest.get_json(&url).await?;
        Ok(list
            .resources
            .into_iter()
            .map(|r| App {
                name: r.entity.name,
                state: r.entity.state,
                instances: r.entity.instances,
                memory_mb: r.entity.memory,
                urls: r.entity.urls,
            })
            .collect())
    }

    async fn service_instances_in_space(&self, space_guid: &str) -> Result<Vec<ServiceInstance>> {
        let url = join_url(
            &self.base_url,
            &format!(
                "/v2/spaces/{space_guid}/service_instances?return_user_provided_service_instances=true&inline-relations-depth=2"
            ),
        );
        let list: ResourceList<ServiceInstanceEntity> = self.rest.get_json(&url).await?;
        Ok(list
            .resources
            .into_iter()
            .map(|r| {
                let plan = r.entity.service_plan;
                let service = plan
                    .as_ref()
                    .and_then(|p| p.entity.service.as_ref())
                    .map(|s| s.entity.label.clone());
                ServiceInstance {
                    name: r.entity.name,
                    service_plan: plan.map(|p| p.entity.name),
                    service,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_entity_decodes_with_missing_optionals() {
        let json = r#"{
            "resources": [
                {"entity": {"name": "my-app", "state": "STARTED"}}
            ]
        }"#;
        let list: ResourceList<AppEntity> = serde_json::from_str(json).unwrap();
        let entity = &list.resources[0].entity;
        assert_eq!(entity.name, "my-app");
        assert_eq!(entity.state, "STARTED");
        assert_eq!(entity.instances, 0);
        assert!(entity.urls.is_empty());
    }

    #[test]
    fn service_instance_entity_decodes_inline_relations() {
        let json = r#"{
            "resources": [
                {"entity": {
                    "name": "my-db",
                    "service_plan": {"entity": {
                        "name": "Lite",
                        "service": {"entity": {"label": "cloudantNoSQLDB"}}
                    }}
                }},
                {"entity": {"name": "user-provided", "service_plan": null}}
            ]
        }"#;
        let list: ResourceList<ServiceInstanceEntity> = serde_json::from_str(json).unwrap();
        assert_eq!(list.resources.len(), 2);
        let plan = list.resources[0].entity.service_plan.as_ref().unwrap();
        assert_eq!(plan.entity.name, "Lite");
        assert!(list.resources[1].entity.service_plan.is_none());
    }
}
