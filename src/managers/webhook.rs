use crate::config::WebhookDefinition;
use crate::constants::replies;
use crate::services::logger::Logger;
use crate::transport::HttpTransport;
use crate::utils::flatten::flatten;
use crate::utils::headers::filter_and_render;
use crate::utils::template::{render, render_string};
use serde_json::{Map, Value};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult {
    pub success: bool,
    /// Empty means no reply should be delivered.
    pub message: String,
}

/// Builds the outbound request from the invocation mapping, issues it, and
/// maps the outcome back into the final reply text.
pub struct WebhookManager {
    logger: Logger,
    transport: Arc<dyn HttpTransport>,
    default_timeout_ms: Option<u64>,
}

impl WebhookManager {
    pub fn new(
        logger: Logger,
        transport: Arc<dyn HttpTransport>,
        default_timeout_ms: Option<u64>,
    ) -> Self {
        Self {
            logger: logger.child("webhook"),
            transport,
            default_timeout_ms,
        }
    }

    pub async fn dispatch(
        &self,
        definition: &WebhookDefinition,
        mapping: &Map<String, Value>,
    ) -> DispatchResult {
        let url = render_string(&definition.url, mapping);
        let headers = filter_and_render(&definition.headers, mapping);
        let payload = definition.body.as_ref().map(|body| render(body, mapping));
        let timeout_ms = definition.timeout_ms(self.default_timeout_ms);

        self.logger.debug(
            "Dispatching webhook request",
            Some(&serde_json::json!({
                "command": definition.command,
                "method": definition.method,
                "url": url,
                "headers": headers,
                "timeout_ms": timeout_ms,
            })),
        );

        match self
            .transport
            .request(
                &definition.method,
                &url,
                &headers,
                payload.as_ref(),
                timeout_ms,
            )
            .await
        {
            Ok(response) => {
                let mut message_mapping = mapping.clone();
                message_mapping.insert("status".to_string(), Value::Number(response.status.into()));
                for (key, value) in flatten(&response.body) {
                    message_mapping.insert(key, value);
                }
                if definition.is_success_status(response.status) {
                    self.logger.debug(
                        "Webhook request succeeded",
                        Some(&serde_json::json!({
                            "command": definition.command,
                            "status": response.status,
                        })),
                    );
                    self.success_result(definition, &message_mapping)
                } else {
                    self.logger.warn(
                        "Webhook returned unexpected status",
                        Some(&serde_json::json!({
                            "command": definition.command,
                            "status": response.status,
                        })),
                    );
                    self.failure_result(definition, &message_mapping, replies::ERROR_STATUS_DEFAULT)
                }
            }
            Err(failure) => {
                self.logger.error(
                    "Webhook request failed",
                    Some(&serde_json::json!({
                        "command": definition.command,
                        "error": failure.description,
                    })),
                );
                let mut message_mapping = mapping.clone();
                message_mapping.insert(
                    "error".to_string(),
                    Value::String(failure.description.clone()),
                );
                if let Some(body) = failure.body.as_ref() {
                    for (key, value) in flatten(body) {
                        message_mapping.insert(key, value);
                    }
                }
                self.failure_result(
                    definition,
                    &message_mapping,
                    replies::ERROR_TRANSPORT_DEFAULT,
                )
            }
        }
    }

    fn success_result(
        &self,
        definition: &WebhookDefinition,
        mapping: &Map<String, Value>,
    ) -> DispatchResult {
        if !definition.enable_success_reply {
            return DispatchResult {
                success: true,
                message: String::new(),
            };
        }
        let template = definition
            .success_message
            .as_deref()
            .unwrap_or(replies::SUCCESS_DEFAULT);
        DispatchResult {
            success: true,
            message: render_string(template, mapping),
        }
    }

    fn failure_result(
        &self,
        definition: &WebhookDefinition,
        mapping: &Map<String, Value>,
        fallback: &str,
    ) -> DispatchResult {
        if !definition.enable_error_reply {
            return DispatchResult {
                success: false,
                message: String::new(),
            };
        }
        let template = definition.error_message.as_deref().unwrap_or(fallback);
        DispatchResult {
            success: false,
            message: render_string(template, mapping),
        }
    }
}
