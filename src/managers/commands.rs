use crate::config::{Config, WebhookDefinition};
use crate::errors::{HookError, HookErrorKind};
use crate::managers::webhook::{DispatchResult, WebhookManager};
use crate::services::logger::Logger;
use crate::services::params::{invocation_mapping, resolve_named, resolve_positional};
use crate::transport::{Connection, ConnectionResolver};
use serde_json::{Map, Value};
use std::sync::Arc;

/// One parsed command invocation as supplied by the hosting framework.
pub struct Invocation {
    pub identity: String,
    pub args: Vec<String>,
    pub options: Map<String, Value>,
    pub reply_target: String,
    /// Connection that received the triggering command; delivery falls back
    /// to it when the definition's bot selector is unset or unresolvable.
    pub origin: Option<Arc<dyn Connection>>,
}

/// Maps each configured definition to an invocable action and sequences
/// parameter resolution, dispatch, and reply delivery.
pub struct CommandSurface {
    logger: Logger,
    definitions: Vec<Arc<WebhookDefinition>>,
    webhook_manager: Arc<WebhookManager>,
    resolver: Arc<dyn ConnectionResolver>,
}

impl CommandSurface {
    pub fn new(
        logger: Logger,
        config: &Config,
        webhook_manager: Arc<WebhookManager>,
        resolver: Arc<dyn ConnectionResolver>,
    ) -> Self {
        let logger = logger.child("commands");
        let mut definitions = Vec::new();
        for definition in &config.webhooks {
            logger.info(
                "Registering command",
                Some(&serde_json::json!({
                    "command": definition.command,
                    "url": definition.url,
                })),
            );
            definitions.push(Arc::new(definition.clone()));
        }
        Self {
            logger,
            definitions,
            webhook_manager,
            resolver,
        }
    }

    pub fn definitions(&self) -> &[Arc<WebhookDefinition>] {
        &self.definitions
    }

    pub fn definition(&self, trigger: &str) -> Option<&Arc<WebhookDefinition>> {
        self.definitions
            .iter()
            .find(|definition| definition.command == trigger)
    }

    /// Resolves parameters, dispatches the request, and delivers the final
    /// non-empty message. A missing required parameter aborts before any
    /// HTTP call and becomes the returned message.
    pub async fn invoke(
        &self,
        trigger: &str,
        invocation: &Invocation,
    ) -> Result<DispatchResult, HookError> {
        let definition = self
            .definition(trigger)
            .ok_or_else(|| HookError::not_found(format!("Unknown command: {}", trigger)))?;

        self.logger.info(
            "Command invoked",
            Some(&serde_json::json!({
                "command": trigger,
                "user": invocation.identity,
            })),
        );

        let positional = match resolve_positional(&definition.params, &invocation.args) {
            Ok(mapping) => mapping,
            Err(err) => return Ok(self.parameter_failure(err)),
        };
        let named = match resolve_named(&definition.options, &invocation.options) {
            Ok(mapping) => mapping,
            Err(err) => return Ok(self.parameter_failure(err)),
        };
        let mapping = invocation_mapping(&invocation.identity, positional, named);

        let result = self.webhook_manager.dispatch(definition, &mapping).await;
        if !result.message.is_empty() {
            self.deliver(definition, invocation, &result.message).await;
        }
        Ok(result)
    }

    fn parameter_failure(&self, err: HookError) -> DispatchResult {
        debug_assert_eq!(err.kind, HookErrorKind::MissingParameter);
        self.logger.warn(
            "Invocation aborted",
            Some(&serde_json::json!({"error": err.message.clone()})),
        );
        DispatchResult {
            success: false,
            message: err.message,
        }
    }

    async fn deliver(
        &self,
        definition: &WebhookDefinition,
        invocation: &Invocation,
        message: &str,
    ) {
        let connection = self
            .resolver
            .resolve(definition.bot.as_ref())
            .or_else(|| invocation.origin.clone());
        let Some(connection) = connection else {
            self.logger.warn(
                "No connection available for reply",
                Some(&serde_json::json!({"command": definition.command})),
            );
            return;
        };
        if let Err(err) = connection.deliver(&invocation.reply_target, message).await {
            self.logger.error(
                "Reply delivery failed",
                Some(&serde_json::json!({
                    "command": definition.command,
                    "error": err.message,
                })),
            );
        }
    }

    /// Descriptive listing of every configured definition: usage signature,
    /// description, bot selector, and parameter specs. No side effects.
    pub fn list(&self) -> String {
        if self.definitions.is_empty() {
            return "No webhook commands are configured".to_string();
        }
        let mut lines = vec!["Available webhook commands:".to_string()];
        for definition in &self.definitions {
            lines.push(String::new());
            lines.push(format!("/{}", definition.usage()));
            lines.push(format!("  {}", definition.description()));
            if let Some(bot) = &definition.bot {
                lines.push(format!("  bot: {}:{}", bot.platform, bot.id));
            }
            for param in &definition.params {
                lines.push(format!("  param: {}{}", param.name, spec_suffix(param.required, &param.default)));
            }
            for option in &definition.options {
                lines.push(format!(
                    "  option: --{} ({}){}",
                    option.flag(),
                    option.name,
                    spec_suffix(option.required, &option.default)
                ));
            }
        }
        lines.join("\n")
    }
}

fn spec_suffix(required: bool, default: &Option<Value>) -> String {
    let mut out = if required {
        " (required)".to_string()
    } else {
        " (optional)".to_string()
    };
    if let Some(default) = default {
        out.push_str(&format!(", default {}", default));
    }
    out
}
