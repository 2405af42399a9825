//! Rancher API interaction module
//!
//! The concrete transport behind the resource model: credentials, the HTTP
//! client, and the main client that fetches and hydrates resources.
//!
//! # Module Structure
//!
//! - [`auth`] - API key pair used for basic auth
//! - [`client`] - Main Rancher client; implements [`crate::Transport`]
//! - [`http`] - HTTP utilities for REST API calls
//!
//! # Example
//!
//! ```ignore
//! use rancher_api::{Config, RancherClient};
//!
//! async fn example() -> rancher_api::Result<()> {
//!     let client = RancherClient::from_config(&Config::load())?;
//!     let container = client.get_container("1i42").await?;
//!     if container.is_restartable() {
//!         container.restart(&client).await?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;
