use async_trait::async_trait;
use hooksend::errors::HookError;
use hooksend::transport::{Connection, HttpResponse, HttpTransport, TransportFailure};
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub url: String,
    pub headers: Map<String, Value>,
    pub payload: Option<Value>,
    pub timeout_ms: u64,
}

/// Scripted HTTP transport; without a scripted outcome it answers 200 with
/// an empty body.
pub struct MockTransport {
    calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<VecDeque<Result<HttpResponse, TransportFailure>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(VecDeque::new()),
        }
    }

    pub fn respond_with(self, status: u16, body: Value) -> Self {
        self.responses
            .lock()
            .expect("responses lock")
            .push_back(Ok(HttpResponse { status, body }));
        self
    }

    pub fn fail_with(self, description: &str, body: Option<Value>) -> Self {
        self.responses
            .lock()
            .expect("responses lock")
            .push_back(Err(TransportFailure {
                description: description.to_string(),
                body,
            }));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn request(
        &self,
        method: &str,
        url: &str,
        headers: &Map<String, Value>,
        payload: Option<&Value>,
        timeout_ms: u64,
    ) -> Result<HttpResponse, TransportFailure> {
        self.calls.lock().expect("calls lock").push(RecordedCall {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            payload: payload.cloned(),
            timeout_ms,
        });
        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| {
                Ok(HttpResponse {
                    status: 200,
                    body: Value::Null,
                })
            })
    }
}

/// Recording connection standing in for a live messaging session.
pub struct MockConnection {
    platform: String,
    id: String,
    deliveries: Mutex<Vec<(String, String)>>,
}

impl MockConnection {
    pub fn new(platform: &str, id: &str) -> Self {
        Self {
            platform: platform.to_string(),
            id: id.to_string(),
            deliveries: Mutex::new(Vec::new()),
        }
    }

    pub fn deliveries(&self) -> Vec<(String, String)> {
        self.deliveries.lock().expect("deliveries lock").clone()
    }
}

#[async_trait]
impl Connection for MockConnection {
    fn platform(&self) -> &str {
        &self.platform
    }

    fn id(&self) -> &str {
        &self.id
    }

    async fn deliver(&self, target: &str, text: &str) -> Result<(), HookError> {
        self.deliveries
            .lock()
            .expect("deliveries lock")
            .push((target.to_string(), text.to_string()));
        Ok(())
    }
}
