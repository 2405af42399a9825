//! Resource model
//!
//! Typed client-side representations of Rancher entities. A resource is a
//! snapshot: it carries identity, the last reported lifecycle state, and the
//! actions the server allowed at that moment. Invoking an action does not
//! refresh the snapshot; fetch again to see the new state.
//!
//! # Architecture
//!
//! - [`action`] - Known action names and the per-resource action map
//! - [`base`] - Shared metadata, the [`Resource`] trait, and action invocation
//! - [`container`] - Container configuration and lifecycle verbs
//! - [`hydrate`] - Kind registry and document-to-resource conversion
//!
//! # Example
//!
//! ```ignore
//! use rancher_api::resource::{hydrate, StopOptions};
//!
//! async fn stop_if_running(client: &RancherClient, doc: &Value) -> rancher_api::Result<()> {
//!     if let Some(container) = hydrate(doc)?.into_container() {
//!         if container.is_stoppable() {
//!             container.stop(client, StopOptions::default().timeout(30)).await?;
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod action;
pub mod base;
pub mod container;
pub mod hydrate;

pub use action::{Action, ActionMap, Endpoint};
pub use base::{Resource, ResourceMeta};
pub use container::{Container, ContainerSpec, RestartPolicy, StopOptions, IMAGE_SCHEME};
pub use hydrate::{hydrate, hydrate_collection, kind_of, AnyResource, ResourceKind};
