//! Rancher Client
//!
//! Main client for the Rancher API, combining credentials, the HTTP layer
//! and the API root. It is the [`Transport`] the resource model posts
//! actions through, and adds the collection/get calls that produce
//! hydrated resources.

use super::auth::ApiCredentials;
use super::http::RancherHttpClient;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::resource::{hydrate, AnyResource, Container, ContainerSpec, Resource, ResourceKind};
use crate::transport::Transport;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use url::Url;

/// Main Rancher client
#[derive(Clone)]
pub struct RancherClient {
    http: RancherHttpClient,
    base_url: Url,
}

impl RancherClient {
    /// Create a client for the API root at `base_url`, e.g.
    /// `http://rancher.local:8080/v1/projects/1a5/`
    pub fn new(base_url: &str, credentials: Option<ApiCredentials>) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        // Url::join replaces the last segment unless the path ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = RancherHttpClient::new(credentials).map_err(Error::Transport)?;

        Ok(Self { http, base_url })
    }

    /// Create a client from loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let url = config.url.as_deref().ok_or(Error::MissingUrl)?;
        Self::new(url, config.credentials())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Make a GET request to the Rancher API
    pub async fn get(&self, url: &str) -> anyhow::Result<Value> {
        self.http.get(url).await
    }

    /// Make a POST request to the Rancher API
    pub async fn post(&self, url: &str, body: Option<&Value>) -> anyhow::Result<Value> {
        self.http.post(url, body).await
    }

    // =========================================================================
    // URL helpers
    // =========================================================================

    /// URL of a kind's collection, e.g. `<root>/containers`
    pub fn collection_url(&self, kind: ResourceKind) -> Result<Url> {
        Ok(self.base_url.join(kind.collection())?)
    }

    /// URL of a single resource, e.g. `<root>/containers/1i42`
    pub fn resource_url(&self, kind: ResourceKind, id: &str) -> Result<Url> {
        Ok(self.base_url.join(&format!("{}/{}", kind.collection(), id))?)
    }

    // =========================================================================
    // Fetching
    // =========================================================================

    /// GET a resource document and hydrate it
    pub async fn get_resource(&self, url: &str) -> Result<AnyResource> {
        let doc = self.get(url).await.map_err(Error::Transport)?;
        hydrate(&doc)
    }

    /// Fetch one container by id
    pub async fn get_container(&self, id: &str) -> Result<Container> {
        let url = self.resource_url(ResourceKind::Container, id)?;
        let doc = self.get(url.as_str()).await.map_err(Error::Transport)?;
        Container::from_document(&doc)
    }

    /// Fetch a fresh snapshot of a resource through its `self` link
    pub async fn reload<R: Resource>(&self, resource: &R) -> Result<AnyResource> {
        let url = match resource.self_link() {
            Some(link) => link.to_string(),
            None => self.resource_url(resource.kind(), resource.id())?.to_string(),
        };
        self.get_resource(&url).await
    }

    /// List every resource of a kind, following `pagination.next` links.
    /// A page already fetched is never requested again.
    pub async fn list(&self, kind: ResourceKind) -> Result<Vec<AnyResource>> {
        let mut all_items = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(self.collection_url(kind)?.to_string());

        while let Some(url) = next.take() {
            visited.insert(url.clone());
            let page = self.get(&url).await.map_err(Error::Transport)?;

            for item in crate::resource::hydrate::collection_items(&page)? {
                all_items.push(hydrate(item)?);
            }

            next = next_page(&page).filter(|n| !visited.contains(n));
        }

        tracing::debug!("list: kind={}, count={}", kind, all_items.len());
        Ok(all_items)
    }

    /// List every container
    pub async fn list_containers(&self) -> Result<Vec<Container>> {
        Ok(self
            .list(ResourceKind::Container)
            .await?
            .into_iter()
            .filter_map(AnyResource::into_container)
            .collect())
    }

    /// Create a container from a spec and hydrate the server's answer
    pub async fn create_container(&self, spec: &ContainerSpec) -> Result<Container> {
        let url = self.collection_url(ResourceKind::Container)?;
        let payload = spec.to_payload()?;

        tracing::info!("create: kind=container, name={:?}", spec.name());

        let doc = self
            .post(url.as_str(), Some(&payload))
            .await
            .map_err(Error::Transport)?;
        Container::from_document(&doc)
    }
}

/// `pagination.next` of a collection page, if there is another page
fn next_page(page: &Value) -> Option<String> {
    page.get("pagination")
        .and_then(|p| p.get("next"))
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

#[async_trait]
impl Transport for RancherClient {
    async fn post(&self, endpoint: &str, payload: Option<&Value>) -> anyhow::Result<Value> {
        self.http.post(endpoint, payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = RancherClient::new("http://rancher.local:8080/v1/projects/1a5", None).unwrap();
        assert_eq!(client.base_url().as_str(), "http://rancher.local:8080/v1/projects/1a5/");
        assert_eq!(
            client.collection_url(ResourceKind::Container).unwrap().as_str(),
            "http://rancher.local:8080/v1/projects/1a5/containers"
        );
        assert_eq!(
            client.resource_url(ResourceKind::Container, "1i42").unwrap().as_str(),
            "http://rancher.local:8080/v1/projects/1a5/containers/1i42"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = RancherClient::new("not a url", None).err().unwrap();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_from_config_requires_url() {
        let err = RancherClient::from_config(&Config::default()).err().unwrap();
        assert!(matches!(err, Error::MissingUrl));
    }

    #[test]
    fn test_next_page() {
        assert_eq!(
            next_page(&json!({"pagination": {"next": "http://r/v1/containers?marker=m5"}})),
            Some("http://r/v1/containers?marker=m5".to_string())
        );
        assert_eq!(next_page(&json!({"pagination": {"next": null}})), None);
        assert_eq!(next_page(&json!({"data": []})), None);
    }
}
