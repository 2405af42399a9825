//! Container resource
//!
//! [`ContainerSpec`] is the writable configuration assembled before a create
//! call. [`Container`] is a hydrated, read-only snapshot of a container as
//! the server last reported it, including the actions it currently allows.

use super::action::Action;
use super::base::{Resource, ResourceMeta};
use super::hydrate::ResourceKind;
use crate::error::{Error, Result};
use crate::transport::Transport;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Scheme every image reference is stored with
pub const IMAGE_SCHEME: &str = "docker:";

/// Restart policy; only the named policy is kept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestartPolicy {
    name: String,
}

impl RestartPolicy {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Parameters of the `stop` action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StopOptions {
    /// Remove the container once it has stopped
    pub remove: bool,
    /// Seconds to wait for a graceful shutdown before killing
    pub timeout: u64,
}

impl StopOptions {
    pub fn remove(mut self, remove: bool) -> Self {
        self.remove = remove;
        self
    }

    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }
}

/// Container configuration, set by the client before creation.
///
/// Changing these after the container exists does not touch the remote
/// entity; only a later create or update call does.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSpec {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    command: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    stdin_open: bool,
    tty: bool,
    environment: BTreeMap<String, String>,
    ports: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    network_mode: Option<String>,
    cap_add: Vec<String>,
    labels: BTreeMap<String, String>,
    devices: Vec<String>,
    data_volumes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    memory: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    memory_swap: Option<i64>,
    privileged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    restart_policy: Option<RestartPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    volume_driver: Option<String>,
}

impl Default for ContainerSpec {
    fn default() -> Self {
        Self {
            command: Vec::new(),
            image_uuid: None,
            name: None,
            stdin_open: true,
            tty: true,
            environment: BTreeMap::new(),
            ports: Vec::new(),
            network_mode: None,
            cap_add: Vec::new(),
            labels: BTreeMap::new(),
            devices: Vec::new(),
            data_volumes: Vec::new(),
            memory: None,
            memory_swap: None,
            privileged: false,
            restart_policy: None,
            volume_driver: None,
        }
    }
}

impl ContainerSpec {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn command(&self) -> &[String] {
        &self.command
    }

    pub fn image_uuid(&self) -> Option<&str> {
        self.image_uuid.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Interactive console
    pub fn is_stdin_open(&self) -> bool {
        self.stdin_open
    }

    pub fn is_tty(&self) -> bool {
        self.tty
    }

    pub fn environment(&self) -> &BTreeMap<String, String> {
        &self.environment
    }

    /// Port mappings as `source:destination/protocol`, in insertion order
    pub fn ports(&self) -> &[String] {
        &self.ports
    }

    pub fn network_mode(&self) -> Option<&str> {
        self.network_mode.as_deref()
    }

    pub fn capabilities_add(&self) -> &[String] {
        &self.cap_add
    }

    pub fn labels(&self) -> &BTreeMap<String, String> {
        &self.labels
    }

    pub fn devices(&self) -> &[String] {
        &self.devices
    }

    pub fn data_volumes(&self) -> &[String] {
        &self.data_volumes
    }

    /// Memory limit in bytes
    pub fn memory(&self) -> Option<i64> {
        self.memory
    }

    pub fn memory_swap(&self) -> Option<i64> {
        self.memory_swap
    }

    pub fn is_privileged(&self) -> bool {
        self.privileged
    }

    pub fn restart_policy(&self) -> Option<&RestartPolicy> {
        self.restart_policy.as_ref()
    }

    pub fn volume_driver(&self) -> Option<&str> {
        self.volume_driver.as_deref()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    pub fn set_command<I, S>(&mut self, command: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.command = command.into_iter().map(Into::into).collect();
        self
    }

    /// Set the image, adding the `docker:` scheme when it is missing
    pub fn set_image_uuid(&mut self, image: impl Into<String>) -> &mut Self {
        self.image_uuid = Some(normalize_image(image.into()));
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn set_stdin_open(&mut self, stdin_open: bool) -> &mut Self {
        self.stdin_open = stdin_open;
        self
    }

    pub fn set_tty(&mut self, tty: bool) -> &mut Self {
        self.tty = tty;
        self
    }

    pub fn set_network_mode(&mut self, mode: impl Into<String>) -> &mut Self {
        self.network_mode = Some(mode.into());
        self
    }

    pub fn set_memory(&mut self, bytes: i64) -> &mut Self {
        self.memory = Some(bytes);
        self
    }

    pub fn set_memory_swap(&mut self, bytes: i64) -> &mut Self {
        self.memory_swap = Some(bytes);
        self
    }

    pub fn set_privileged(&mut self, privileged: bool) -> &mut Self {
        self.privileged = privileged;
        self
    }

    /// Replace the restart policy
    pub fn set_restart_policy(&mut self, name: impl Into<String>) -> &mut Self {
        self.restart_policy = Some(RestartPolicy::new(name));
        self
    }

    pub fn set_volume_driver(&mut self, driver: impl Into<String>) -> &mut Self {
        self.volume_driver = Some(driver.into());
        self
    }

    // =========================================================================
    // Accumulators
    // =========================================================================

    /// Set an environment variable, overwriting any previous value for `key`
    pub fn add_environment_variable(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.environment.insert(key.into(), value.into());
        self
    }

    /// Append a port mapping, stored as `source:destination/protocol`
    pub fn add_port(&mut self, protocol: &str, source: u16, destination: u16) -> &mut Self {
        self.ports.push(format!("{}:{}/{}", source, destination, protocol));
        self
    }

    /// Add a capability; already present capabilities are not repeated
    pub fn add_capability(&mut self, capability: impl Into<String>) -> &mut Self {
        let capability = capability.into();
        if !self.cap_add.contains(&capability) {
            self.cap_add.push(capability);
        }
        self
    }

    /// Set a label, overwriting any previous value for `key`
    pub fn add_label(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn add_device(&mut self, device: impl Into<String>) -> &mut Self {
        self.devices.push(device.into());
        self
    }

    pub fn add_data_volume(&mut self, volume: impl Into<String>) -> &mut Self {
        self.data_volumes.push(volume.into());
        self
    }

    /// Create document for this configuration, tagged `"type": "container"`
    pub fn to_payload(&self) -> Result<Value> {
        let mut payload = serde_json::to_value(self)?;
        if let Value::Object(ref mut map) = payload {
            map.insert(
                "type".to_string(),
                Value::String(ResourceKind::Container.as_str().to_string()),
            );
        }
        Ok(payload)
    }
}

/// Prefix `image` with the `docker:` scheme unless it already has it
fn normalize_image(image: String) -> String {
    if image.starts_with(IMAGE_SCHEME) {
        image
    } else {
        format!("{}{}", IMAGE_SCHEME, image)
    }
}

/// Keep the string-valued entries of a keyed wire map
fn string_entries(field: &str, map: Option<Map<String, Value>>) -> BTreeMap<String, String> {
    map.unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key, s)),
            other => {
                tracing::trace!("ignoring non-string {} entry {}: {}", field, key, other);
                None
            },
        })
        .collect()
}

/// Container fields as they appear on the wire. `null` and absent read the same.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ContainerDocument {
    command: Option<Vec<String>>,
    description: Option<String>,
    image_uuid: Option<String>,
    name: Option<String>,
    stdin_open: Option<bool>,
    tty: Option<bool>,
    environment: Option<Map<String, Value>>,
    ports: Option<Vec<String>>,
    network_mode: Option<String>,
    cap_add: Option<Vec<String>>,
    primary_ip_address: Option<String>,
    labels: Option<Map<String, Value>>,
    devices: Option<Vec<String>>,
    data_volumes: Option<Vec<String>>,
    memory: Option<i64>,
    memory_swap: Option<i64>,
    privileged: Option<bool>,
    restart_policy: Option<RestartPolicy>,
    volume_driver: Option<String>,
}

impl From<ContainerDocument> for ContainerSpec {
    fn from(doc: ContainerDocument) -> Self {
        Self {
            command: doc.command.unwrap_or_default(),
            image_uuid: doc.image_uuid.map(normalize_image),
            name: doc.name,
            stdin_open: doc.stdin_open.unwrap_or(true),
            tty: doc.tty.unwrap_or(true),
            environment: string_entries("environment", doc.environment),
            ports: doc.ports.unwrap_or_default(),
            network_mode: doc.network_mode,
            cap_add: doc.cap_add.unwrap_or_default(),
            labels: string_entries("labels", doc.labels),
            devices: doc.devices.unwrap_or_default(),
            data_volumes: doc.data_volumes.unwrap_or_default(),
            memory: doc.memory,
            memory_swap: doc.memory_swap,
            privileged: doc.privileged.unwrap_or(false),
            restart_policy: doc.restart_policy,
            volume_driver: doc.volume_driver,
        }
    }
}

/// Hydrated container
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    meta: ResourceMeta,
    spec: ContainerSpec,
    description: Option<String>,
    primary_ip_address: Option<String>,
}

impl Container {
    /// Hydrate from a document whose `type` is `"container"`
    pub fn from_document(doc: &Value) -> Result<Self> {
        let found = doc
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(Error::MissingField("type"))?;
        if found != ResourceKind::Container.as_str() {
            return Err(Error::KindMismatch {
                expected: ResourceKind::Container.as_str(),
                found: found.to_string(),
            });
        }

        let meta = ResourceMeta::from_document(doc)?;
        let mut fields = ContainerDocument::deserialize(doc)?;
        let description = fields.description.take();
        let primary_ip_address = fields.primary_ip_address.take();

        Ok(Self {
            meta,
            spec: fields.into(),
            description,
            primary_ip_address,
        })
    }

    /// Assemble a snapshot from parts, e.g. for fixtures
    pub fn from_parts(meta: ResourceMeta, spec: ContainerSpec) -> Self {
        Self {
            meta,
            spec,
            description: None,
            primary_ip_address: None,
        }
    }

    /// Configuration as reported by the server
    pub fn spec(&self) -> &ContainerSpec {
        &self.spec
    }

    /// Copy the configuration out, e.g. to create a similar container
    pub fn into_spec(self) -> ContainerSpec {
        self.spec
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn primary_ip_address(&self) -> Option<&str> {
        self.primary_ip_address.as_deref()
    }

    pub fn is_startable(&self) -> bool {
        self.is_action_available(Action::Start)
    }

    pub fn is_stoppable(&self) -> bool {
        self.is_action_available(Action::Stop)
    }

    pub fn is_restartable(&self) -> bool {
        self.is_action_available(Action::Restart)
    }

    pub fn is_purgeable(&self) -> bool {
        self.is_action_available(Action::Purge)
    }

    pub async fn start<T: Transport + ?Sized>(&self, transport: &T) -> Result<Value> {
        self.meta
            .invoke(transport, ResourceKind::Container, Action::Start, None)
            .await
    }

    /// Stop the container, optionally removing it afterwards
    pub async fn stop<T: Transport + ?Sized>(
        &self,
        transport: &T,
        options: StopOptions,
    ) -> Result<Value> {
        let payload = serde_json::to_value(options)?;
        self.meta
            .invoke(transport, ResourceKind::Container, Action::Stop, Some(&payload))
            .await
    }

    pub async fn restart<T: Transport + ?Sized>(&self, transport: &T) -> Result<Value> {
        self.meta
            .invoke(transport, ResourceKind::Container, Action::Restart, None)
            .await
    }

    /// Purge a removed container. Whether that is allowed is up to the server.
    pub async fn purge<T: Transport + ?Sized>(&self, transport: &T) -> Result<Value> {
        self.meta
            .invoke(transport, ResourceKind::Container, Action::Purge, None)
            .await
    }
}

impl Resource for Container {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Container
    }

    fn meta(&self) -> &ResourceMeta {
        &self.meta
    }
}
