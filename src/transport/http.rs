use super::{HttpResponse, HttpTransport, TransportFailure};
use crate::constants::network;
use crate::errors::HookError;
use crate::utils::template::stringify_value;
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::{Map, Value};
use std::time::Duration;
use url::Url;

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, HookError> {
        let client = Client::builder()
            .build()
            .map_err(|err| HookError::internal(format!("HTTP client init failed: {}", err)))?;
        Ok(Self { client })
    }
}

fn query_pairs(payload: &Value) -> Vec<(String, String)> {
    match payload {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| (key.clone(), stringify_value(value)))
            .collect(),
        _ => Vec::new(),
    }
}

fn describe_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else {
        err.to_string()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn request(
        &self,
        method: &str,
        url: &str,
        headers: &Map<String, Value>,
        payload: Option<&Value>,
        timeout_ms: u64,
    ) -> Result<HttpResponse, TransportFailure> {
        let mut target = Url::parse(url)
            .map_err(|err| TransportFailure::new(format!("invalid URL {}: {}", url, err)))?;
        if !network::ALLOWED_SCHEMES.contains(&target.scheme()) {
            return Err(TransportFailure::new(format!(
                "unsupported URL scheme: {}",
                target.scheme()
            )));
        }
        let method = Method::from_bytes(method.to_uppercase().as_bytes())
            .map_err(|_| TransportFailure::new(format!("invalid HTTP method: {}", method)))?;

        if method == Method::GET {
            if let Some(payload) = payload {
                let pairs = query_pairs(payload);
                if !pairs.is_empty() {
                    let query = serde_urlencoded::to_string(&pairs).map_err(|err| {
                        TransportFailure::new(format!("query encoding failed: {}", err))
                    })?;
                    let merged = match target.query() {
                        Some(existing) if !existing.is_empty() => {
                            format!("{}&{}", existing, query)
                        }
                        _ => query,
                    };
                    target.set_query(Some(&merged));
                }
            }
        }

        let mut req = self.client.request(method.clone(), target);
        for (name, value) in headers.iter() {
            if let Some(text) = value.as_str() {
                req = req.header(name.as_str(), text);
            }
        }
        if method != Method::GET {
            if let Some(payload) = payload {
                req = req.json(payload);
            }
        }
        req = req.timeout(Duration::from_millis(timeout_ms));

        let response = req
            .send()
            .await
            .map_err(|err| TransportFailure::new(describe_error(&err)))?;
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let body = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };
        Ok(HttpResponse { status, body })
    }
}
