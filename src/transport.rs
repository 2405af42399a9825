//! Transport seam
//!
//! The resource model never talks to the network directly. Action
//! invocations go through a [`Transport`], which owns auth, connections
//! and response parsing. [`crate::rancher::client::RancherClient`] is the
//! HTTP implementation.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

#[async_trait]
pub trait Transport: Send + Sync {
    /// POST to an endpoint taken from a resource's action map.
    ///
    /// `payload` is a flat object of parameter name to scalar value. The
    /// returned value is whatever the server answered, typically the
    /// updated resource document.
    async fn post(&self, endpoint: &str, payload: Option<&Value>) -> Result<Value>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for &T {
    async fn post(&self, endpoint: &str, payload: Option<&Value>) -> Result<Value> {
        (**self).post(endpoint, payload).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn post(&self, endpoint: &str, payload: Option<&Value>) -> Result<Value> {
        (**self).post(endpoint, payload).await
    }
}
