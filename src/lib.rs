//! Typed client model for the Rancher API
//!
//! Remote entities are hydrated from JSON into typed resources. Each one
//! carries the actions the server currently allows on it, and its verb
//! methods check that set before posting anything.
//!
//! - [`resource`] - Resource model, action map, hydration
//! - [`transport`] - The seam actions are posted through
//! - [`rancher`] - HTTP implementation of the transport
//! - [`config`] - API location and credentials
//! - [`logging`] - Optional tracing subscriber setup

pub mod config;
pub mod error;
pub mod logging;
pub mod rancher;
pub mod resource;
pub mod transport;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::{Error, Result};
pub use rancher::client::RancherClient;
pub use rancher::http::format_api_error;
pub use resource::{
    hydrate, Action, ActionMap, AnyResource, Container, ContainerSpec, Resource, ResourceKind,
    StopOptions,
};
pub use transport::Transport;
