use crate::config::Config;
use crate::errors::HookError;
use crate::managers::commands::CommandSurface;
use crate::managers::webhook::WebhookManager;
use crate::services::logger::{LogLevel, Logger};
use crate::transport::http::ReqwestTransport;
use crate::transport::registry::ConnectionRegistry;
use std::sync::Arc;

pub struct App {
    pub logger: Logger,
    pub surface: Arc<CommandSurface>,
    pub connections: Arc<ConnectionRegistry>,
}

impl App {
    pub fn initialize(config: Config) -> Result<Self, HookError> {
        let logger = Logger::new("hooksend", LogLevel::resolve(config.verbose));
        config.validate()?;

        if config.webhooks.is_empty() {
            logger.warn(
                "No webhooks configured; no commands will be registered",
                None,
            );
        }

        let transport = Arc::new(ReqwestTransport::new()?);
        let webhook_manager = Arc::new(WebhookManager::new(
            logger.clone(),
            transport,
            config.default_timeout_ms,
        ));
        let connections = Arc::new(ConnectionRegistry::new(logger.clone()));
        let surface = Arc::new(CommandSurface::new(
            logger.clone(),
            &config,
            webhook_manager,
            connections.clone(),
        ));

        logger.info(
            "Webhook commands registered",
            Some(&serde_json::json!({"count": surface.definitions().len()})),
        );

        Ok(Self {
            logger,
            surface,
            connections,
        })
    }
}
