pub mod http;
pub mod registry;

use crate::config::BotSelector;
use crate::errors::HookError;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Value,
}

/// Transport-level failure (connect error, timeout, DNS failure) with a
/// human-readable description. A body is attached when the failing exchange
/// still produced one.
#[derive(Debug, Clone)]
pub struct TransportFailure {
    pub description: String,
    pub body: Option<Value>,
}

impl TransportFailure {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            body: None,
        }
    }
}

/// Issues one outbound request. All status codes resolve to a response; the
/// caller, not the transport, classifies success. For GET the payload is
/// encoded as query parameters, otherwise it is sent as the JSON body.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn request(
        &self,
        method: &str,
        url: &str,
        headers: &Map<String, Value>,
        payload: Option<&Value>,
        timeout_ms: u64,
    ) -> Result<HttpResponse, TransportFailure>;
}

/// A live messaging connection able to deliver a text reply.
#[async_trait]
pub trait Connection: Send + Sync {
    fn platform(&self) -> &str;
    fn id(&self) -> &str;
    async fn deliver(&self, target: &str, text: &str) -> Result<(), HookError>;
}

/// Injected lookup over the live connections. `None` means the caller should
/// fall back to the connection that received the triggering command.
pub trait ConnectionResolver: Send + Sync {
    fn resolve(&self, selector: Option<&BotSelector>) -> Option<Arc<dyn Connection>>;
}
