//! In-memory transport for unit tests

use crate::transport::Transport;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub endpoint: String,
    pub payload: Option<Value>,
}

/// Records every POST and answers with a canned result
pub struct RecordingTransport {
    calls: Mutex<Vec<RecordedCall>>,
    failure: Option<String>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    /// Fails every call with `message`
    pub fn failing(message: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failure: Some(message.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn post(&self, endpoint: &str, payload: Option<&Value>) -> Result<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            endpoint: endpoint.to_string(),
            payload: payload.cloned(),
        });

        match &self.failure {
            Some(message) => Err(anyhow::anyhow!("{}", message)),
            None => Ok(json!({"type": "container", "state": "updating"})),
        }
    }
}
