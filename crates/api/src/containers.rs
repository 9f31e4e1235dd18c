//! Containers API client.
//!
//! The containers service lives on its own endpoint, derived from the
//! primary API endpoint (see [`crate::container_endpoint`]). The space scope
//! travels in the `X-Auth-Project-Id` header rather than the path.

use anyhow::{Context as _, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;

use crate::client::{RestClient, join_url};

const PROJECT_ID_HEADER: &str = "X-Auth-Project-Id";

/// A container row as rendered by the `list` command.
///
/// `created` is the creation time as a unix timestamp, passed through as the
/// API returns it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Container {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Image")]
    pub image: String,
    #[serde(rename = "ContainerState")]
    pub state: String,
    #[serde(rename = "Created", default)]
    pub created: i64,
}

/// Read side of the containers service used by the `list` command.
#[async_trait::async_trait]
pub trait ContainerApi: Send + Sync {
    async fn containers(&self, space_guid: &str) -> Result<Vec<Container>>;
}

/// Client for the containers-api endpoint.
#[derive(Debug, Clone)]
pub struct ContainerClient {
    base_url: String,
    rest: RestClient,
}

impl ContainerClient {
    pub fn new(base_url: String, rest: RestClient) -> Self {
        Self { base_url, rest }
    }
}

#[async_trait::async_trait]
impl ContainerApi for ContainerClient {
    async fn containers(&self, space_guid: &str) -> Result<Vec<Container>> {
        let url = join_url(&self.base_url, "/v3/containers/json?all=true");

        let mut headers = HeaderMap::new();
        headers.insert(
            PROJECT_ID_HEADER,
            HeaderValue::from_str(space_guid).context("space guid is not a valid header value")?,
        );

        self.rest.get_json_with(&url, headers).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_decodes_docker_style_fields() {
        let json = r#"[
            {"Name": "worker-1", "Image": "registry.example.com/worker:3",
             "ContainerState": "Running", "Created": 1487251200},
            {"Name": "worker-2", "Image": "registry.example.com/worker:3",
             "ContainerState": "Shutdown"}
        ]"#;
        let containers: Vec<Container> = serde_json::from_str(json).unwrap();
        assert_eq!(containers[0].name, "worker-1");
        assert_eq!(containers[0].created, 1487251200);
        assert_eq!(containers[1].state, "Shutdown");
        assert_eq!(containers[1].created, 0);
    }
}
