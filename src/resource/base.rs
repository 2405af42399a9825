//! Resource base
//!
//! Identity, lifecycle state and the action machinery shared by every
//! concrete resource kind.

use super::action::{Action, ActionMap};
use super::hydrate::ResourceKind;
use crate::error::{Error, Result};
use crate::transport::Transport;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;

/// Fields every resource document carries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceMeta {
    id: String,
    state: String,
    name: Option<String>,
    uuid: Option<String>,
    created: Option<DateTime<Utc>>,
    links: BTreeMap<String, String>,
    actions: ActionMap,
}

impl ResourceMeta {
    /// Read the base fields from a document.
    ///
    /// Only `id` is required. A missing `state` reads as empty, and a
    /// `created` timestamp that is not RFC 3339 is dropped.
    pub fn from_document(doc: &Value) -> Result<Self> {
        let id = doc
            .get("id")
            .and_then(|v| v.as_str())
            .ok_or(Error::MissingField("id"))?
            .to_string();

        let links = doc
            .get("links")
            .and_then(|v| v.as_object())
            .map(|obj| {
                obj.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
            .unwrap_or_default();

        let created = doc
            .get("created")
            .and_then(|v| v.as_str())
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Ok(Self {
            id,
            state: get_string(doc, "state").unwrap_or_default(),
            name: get_string(doc, "name"),
            uuid: get_string(doc, "uuid"),
            created,
            links,
            actions: ActionMap::from_wire(doc.get("actions")),
        })
    }

    /// Build metadata directly, mostly useful for tests and fixtures
    pub fn new(id: impl Into<String>, state: impl Into<String>, actions: ActionMap) -> Self {
        Self {
            id: id.into(),
            state: state.into(),
            actions,
            ..Self::default()
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Lifecycle label as of the last hydration; may be stale
    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn uuid(&self) -> Option<&str> {
        self.uuid.as_deref()
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }

    pub fn links(&self) -> &BTreeMap<String, String> {
        &self.links
    }

    pub fn link(&self, name: &str) -> Option<&str> {
        self.links.get(name).map(String::as_str)
    }

    pub fn actions(&self) -> &ActionMap {
        &self.actions
    }

    /// Invoke an action through the transport.
    ///
    /// Fails with [`Error::InvalidAction`] without sending anything when the
    /// action map has no entry for `action`. Otherwise issues exactly one
    /// POST and returns the transport's answer, or its error unchanged. The
    /// local state and actions are not refreshed.
    pub async fn invoke<T>(
        &self,
        transport: &T,
        kind: ResourceKind,
        action: Action,
        payload: Option<&Value>,
    ) -> Result<Value>
    where
        T: Transport + ?Sized,
    {
        let Some(endpoint) = self.actions.endpoint(action) else {
            tracing::warn!(
                "refusing {} on {} {}: not available in state {:?}",
                action,
                kind,
                self.id,
                self.state
            );
            return Err(Error::InvalidAction {
                kind: kind.as_str(),
                id: self.id.clone(),
                action,
                state: self.state.clone(),
            });
        };

        tracing::info!(
            "invoke: kind={}, id={}, action={}, endpoint={}",
            kind,
            self.id,
            action,
            endpoint
        );

        transport
            .post(endpoint.as_str(), payload)
            .await
            .map_err(Error::Transport)
    }
}

fn get_string(doc: &Value, key: &str) -> Option<String> {
    doc.get(key).and_then(|v| v.as_str()).map(|s| s.to_string())
}

/// Common interface over hydrated resources
pub trait Resource {
    /// Fixed discriminator of the concrete kind
    fn kind(&self) -> ResourceKind;

    fn meta(&self) -> &ResourceMeta;

    /// Wire name of the kind, e.g. `"container"`
    fn resource_type(&self) -> &'static str {
        self.kind().as_str()
    }

    fn id(&self) -> &str {
        self.meta().id()
    }

    fn state(&self) -> &str {
        self.meta().state()
    }

    fn actions(&self) -> &ActionMap {
        self.meta().actions()
    }

    fn is_action_available(&self, action: Action) -> bool {
        self.meta().actions().is_available(action)
    }

    /// URL to re-fetch this resource from
    fn self_link(&self) -> Option<&str> {
        self.meta().link("self")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_meta_from_document() {
        let meta = ResourceMeta::from_document(&json!({
            "id": "1i42",
            "type": "container",
            "state": "running",
            "name": "web",
            "uuid": "4b1f0c1e-0000-4000-8000-000000000000",
            "created": "2016-03-01T10:00:00Z",
            "links": {
                "self": "http://rancher/v1/containers/1i42",
                "hosts": "http://rancher/v1/containers/1i42/hosts",
                "broken": null
            },
            "actions": {
                "stop": "http://rancher/v1/containers/1i42/?action=stop"
            }
        }))
        .unwrap();

        assert_eq!(meta.id(), "1i42");
        assert_eq!(meta.state(), "running");
        assert_eq!(meta.name(), Some("web"));
        assert!(meta.created().is_some());
        assert_eq!(meta.links().len(), 2);
        assert_eq!(meta.link("self"), Some("http://rancher/v1/containers/1i42"));
        assert!(meta.actions().is_available(Action::Stop));
        assert!(!meta.actions().is_available(Action::Start));
    }

    #[test]
    fn test_meta_requires_id() {
        let err = ResourceMeta::from_document(&json!({"state": "running"})).unwrap_err();
        assert!(matches!(err, Error::MissingField("id")));
    }

    #[test]
    fn test_meta_tolerates_missing_optionals() {
        let meta = ResourceMeta::from_document(&json!({
            "id": "1i1",
            "created": "yesterday"
        }))
        .unwrap();

        assert_eq!(meta.state(), "");
        assert!(meta.created().is_none());
        assert!(meta.links().is_empty());
        assert!(meta.actions().is_empty());
    }
}
