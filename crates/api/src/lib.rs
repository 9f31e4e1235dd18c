//! Platform API clients for the bx-list plugin.
//!
//! This crate covers the outbound side of the plugin:
//!
//! - Constructing an HTTP client from the plugin context (proxying from the
//!   environment, optional TLS-verification bypass, per-request timeout)
//! - Building the default header set around a freshly refreshed UAA token
//! - Deriving the containers-api endpoint from the primary API endpoint
//! - Thin clients for the Cloud Controller and Containers APIs
//!
//! The primary entry points are [`new_http_client`], [`default_headers`],
//! and the two clients [`CcClient`] and [`ContainerClient`], both built on a
//! shared [`RestClient`].
//!
//! # Example
//!
//! ```ignore
//! use bx_api::{CcClient, RestClient, default_headers, new_http_client};
//! use anyhow::Result;
//!
//! async fn apps(context: &dyn bx_plugin::PluginContext) -> Result<()> {
//!     let rest = RestClient::new(new_http_client(context)?, default_headers(context).await?);
//!     let cc = CcClient::new(context.api_endpoint(), rest);
//!     for app in cc.apps_in_space(&context.current_space_guid()).await? {
//!         println!("{}", app.name);
//!     }
//!     Ok(())
//! }
//! ```

mod cc;
mod client;
mod containers;
mod endpoint;

pub use cc::{App, CcClient, CloudControllerApi, ServiceInstance};
pub use client::{ApiError, RestClient, default_headers, new_http_client};
pub use containers::{Container, ContainerApi, ContainerClient};
pub use endpoint::container_endpoint;
