//! HTTP utilities for Rancher REST API calls

use super::auth::ApiCredentials;
use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and drops control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.chars().count() > MAX_LOG_BODY_LENGTH {
        let head: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
        format!("{}... [truncated, {} bytes total]", head, body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP client wrapper for Rancher API calls
#[derive(Clone)]
pub struct RancherHttpClient {
    client: Client,
    credentials: Option<ApiCredentials>,
}

impl RancherHttpClient {
    /// Create a new HTTP client
    pub fn new(credentials: Option<ApiCredentials>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("rancher-api/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, credentials })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some(creds) => request.basic_auth(creds.access_key(), Some(creds.secret_key())),
            None => request,
        }
    }

    /// Make a GET request to the Rancher API
    pub async fn get(&self, url: &str) -> Result<Value> {
        tracing::debug!("GET {}", url);

        let response = self
            .authorize(self.client.get(url))
            .send()
            .await
            .context("Failed to send request")?;

        read_json(response).await
    }

    /// Make a POST request to the Rancher API
    pub async fn post(&self, url: &str, body: Option<&Value>) -> Result<Value> {
        tracing::debug!("POST {}", url);

        let mut request = self.authorize(self.client.post(url));

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.context("Failed to send request")?;

        read_json(response).await
    }
}

/// Check the status and parse the body; an empty body reads as `null`
async fn read_json(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    let body = response
        .text()
        .await
        .context("Failed to read response body")?;

    if !status.is_success() {
        // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
        tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
        return Err(anyhow::anyhow!("API request failed: {}", status));
    }

    if body.is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&body).context("Failed to parse response JSON")
}

/// Format a Rancher API error for display
/// Security: Sanitizes error messages to avoid leaking API details
pub fn format_api_error(error: &anyhow::Error) -> String {
    let error_str = error.to_string();

    if error_str.contains("401") {
        return "Authentication failed. Check RANCHER_ACCESS_KEY and RANCHER_SECRET_KEY.".to_string();
    }
    if error_str.contains("403") {
        return "Permission denied. The API key lacks access to this resource.".to_string();
    }
    if error_str.contains("404") {
        return "Resource not found.".to_string();
    }
    if error_str.contains("409") {
        return "Resource conflict. The resource may have changed state; fetch it again.".to_string();
    }
    if error_str.contains("422") {
        return "Invalid request. Check the action parameters.".to_string();
    }
    if error_str.contains("500") || error_str.contains("503") {
        return "Rancher service temporarily unavailable. Please try again.".to_string();
    }

    if error_str.contains("API request failed") {
        return "Request failed. Check your network connection and try again.".to_string();
    }

    let sanitized = error_str
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(80)
        .collect::<String>();

    if sanitized.len() < error_str.len() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}
