use crate::constants::{commands, network};
use crate::errors::HookError;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const CONFIG_PATH_ENV: &str = "HOOKSEND_CONFIG";

fn default_method() -> String {
    "POST".to_string()
}

fn default_true() -> bool {
    true
}

fn default_success_codes() -> Vec<u16> {
    vec![200]
}

/// Selects which live connection delivers the reply. Unset or unresolvable
/// selectors fall back to the connection that received the command.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BotSelector {
    pub platform: String,
    pub id: String,
}

/// One positional parameter slot; its list position binds the argument token.
#[derive(Debug, Clone, Deserialize)]
pub struct PositionalParam {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: Option<Value>,
}

/// One named option supplied via an explicit flag at invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedOption {
    pub name: String,
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: Option<Value>,
}

impl NamedOption {
    pub fn flag(&self) -> &str {
        self.flag.as_deref().unwrap_or(&self.name)
    }
}

/// Immutable configuration for one registrable command mapping to one
/// outbound HTTP template.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookDefinition {
    pub command: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub headers: Map<String, Value>,
    #[serde(default)]
    pub body: Option<Value>,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(default = "default_success_codes")]
    pub success_codes: Vec<u16>,
    #[serde(default = "default_true")]
    pub enable_success_reply: bool,
    #[serde(default = "default_true")]
    pub enable_error_reply: bool,
    #[serde(default)]
    pub success_message: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub params: Vec<PositionalParam>,
    #[serde(default)]
    pub options: Vec<NamedOption>,
    #[serde(default)]
    pub bot: Option<BotSelector>,
}

impl WebhookDefinition {
    pub fn description(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| format!("Send a webhook request to {}", self.url))
    }

    pub fn timeout_ms(&self, global_default: Option<u64>) -> u64 {
        self.timeout_ms
            .or(global_default)
            .unwrap_or(network::DEFAULT_TIMEOUT_MS)
    }

    pub fn is_success_status(&self, status: u16) -> bool {
        self.success_codes.contains(&status)
    }

    /// Usage signature, e.g. `deploy <env> [tag] [--force <force>]`.
    pub fn usage(&self) -> String {
        let mut out = self.command.clone();
        for param in &self.params {
            if param.required {
                out.push_str(&format!(" <{}>", param.name));
            } else {
                out.push_str(&format!(" [{}]", param.name));
            }
        }
        for option in &self.options {
            if option.required {
                out.push_str(&format!(" --{} <{}>", option.flag(), option.name));
            } else {
                out.push_str(&format!(" [--{} <{}>]", option.flag(), option.name));
            }
        }
        out
    }

    fn validate(&self) -> Result<(), HookError> {
        if self.command.trim().is_empty() {
            return Err(HookError::invalid_params(
                "Webhook command must be a non-empty string",
            ));
        }
        if self.command.trim() == commands::LIST_TRIGGER {
            return Err(HookError::invalid_params(format!(
                "Webhook command must not shadow the built-in '{}' command",
                commands::LIST_TRIGGER
            )));
        }
        if !network::ALLOWED_SCHEMES
            .iter()
            .any(|scheme| self.url.starts_with(&format!("{}://", scheme)))
        {
            return Err(HookError::invalid_params(format!(
                "Webhook '{}' has an unsupported URL: {}",
                self.command, self.url
            )));
        }
        if !["GET", "POST"]
            .iter()
            .any(|method| self.method.eq_ignore_ascii_case(method))
        {
            return Err(HookError::invalid_params(format!(
                "Webhook '{}' method must be GET or POST",
                self.command
            )));
        }
        if self.success_codes.is_empty() {
            return Err(HookError::invalid_params(format!(
                "Webhook '{}' must list at least one success status code",
                self.command
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub webhooks: Vec<WebhookDefinition>,
    #[serde(default)]
    pub default_timeout_ms: Option<u64>,
    #[serde(default = "default_true")]
    pub verbose: bool,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, HookError> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            HookError::not_found(format!("Cannot read config {}: {}", path.display(), err))
        })?;
        let config: Config = serde_json::from_str(&raw).map_err(|err| {
            HookError::invalid_params(format!("Invalid config {}: {}", path.display(), err))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), HookError> {
        let mut seen = HashSet::new();
        for definition in &self.webhooks {
            definition.validate()?;
            if !seen.insert(definition.command.trim().to_string()) {
                return Err(HookError::invalid_params(format!(
                    "Duplicate webhook command: {}",
                    definition.command
                )));
            }
        }
        Ok(())
    }
}

/// Config path from argv[1], falling back to the HOOKSEND_CONFIG env var.
pub fn resolve_config_path() -> Result<PathBuf, HookError> {
    if let Some(arg) = std::env::args().nth(1) {
        return Ok(PathBuf::from(arg));
    }
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    Err(HookError::invalid_params(format!(
        "Config path required: pass it as the first argument or set {}",
        CONFIG_PATH_ENV
    )))
}
