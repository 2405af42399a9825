//! Hydration
//!
//! Turns wire documents into typed resources. The concrete kind is chosen
//! from the document's `type` discriminator against a closed registry;
//! anything outside it is an [`Error::UnknownKind`].

use super::base::{Resource, ResourceMeta};
use super::container::Container;
use crate::error::{Error, Result};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Resource kinds known to this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Container,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 1] = [ResourceKind::Container];

    /// Discriminator string carried in `type`
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Container => "container",
        }
    }

    /// Path segment of the kind's collection under the API root
    pub fn collection(self) -> &'static str {
        match self {
            ResourceKind::Container => "containers",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ResourceKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| Error::UnknownKind(s.to_string()))
    }
}

/// A hydrated resource of any known kind
#[derive(Debug, Clone, PartialEq)]
pub enum AnyResource {
    Container(Container),
}

impl AnyResource {
    pub fn as_container(&self) -> Option<&Container> {
        match self {
            AnyResource::Container(c) => Some(c),
        }
    }

    pub fn into_container(self) -> Option<Container> {
        match self {
            AnyResource::Container(c) => Some(c),
        }
    }
}

impl Resource for AnyResource {
    fn kind(&self) -> ResourceKind {
        match self {
            AnyResource::Container(c) => c.kind(),
        }
    }

    fn meta(&self) -> &ResourceMeta {
        match self {
            AnyResource::Container(c) => c.meta(),
        }
    }
}

impl From<Container> for AnyResource {
    fn from(container: Container) -> Self {
        AnyResource::Container(container)
    }
}

/// Read the `type` discriminator of a document
pub fn kind_of(doc: &Value) -> Result<ResourceKind> {
    doc.get("type")
        .and_then(|v| v.as_str())
        .ok_or(Error::MissingField("type"))?
        .parse()
}

/// Hydrate a single resource document
pub fn hydrate(doc: &Value) -> Result<AnyResource> {
    let kind = kind_of(doc)?;
    tracing::debug!("hydrate: kind={}", kind);

    match kind {
        ResourceKind::Container => Container::from_document(doc).map(AnyResource::Container),
    }
}

/// Hydrate every element of a collection document's `data` array
pub fn hydrate_collection(doc: &Value) -> Result<Vec<AnyResource>> {
    collection_items(doc)?.iter().map(hydrate).collect()
}

/// Elements of a collection document
pub(crate) fn collection_items(doc: &Value) -> Result<&[Value]> {
    doc.get("data")
        .and_then(|v| v.as_array())
        .map(Vec::as_slice)
        .ok_or(Error::MissingField("data"))
}
