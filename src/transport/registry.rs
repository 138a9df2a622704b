use super::{Connection, ConnectionResolver};
use crate::config::BotSelector;
use crate::services::logger::Logger;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Live connections keyed by (platform, id). Hosts register their
/// connections at startup; definitions select one through their bot
/// selector.
pub struct ConnectionRegistry {
    logger: Logger,
    connections: Mutex<HashMap<(String, String), Arc<dyn Connection>>>,
}

impl ConnectionRegistry {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger: logger.child("connections"),
            connections: Mutex::new(HashMap::new()),
        }
    }

    pub fn register(&self, connection: Arc<dyn Connection>) {
        let key = (
            connection.platform().to_string(),
            connection.id().to_string(),
        );
        self.logger.info(
            "Connection registered",
            Some(&serde_json::json!({"platform": key.0, "id": key.1})),
        );
        if let Ok(mut connections) = self.connections.lock() {
            connections.insert(key, connection);
        }
    }
}

impl ConnectionResolver for ConnectionRegistry {
    fn resolve(&self, selector: Option<&BotSelector>) -> Option<Arc<dyn Connection>> {
        let selector = selector?;
        let connections = self.connections.lock().ok()?;
        let found = connections
            .get(&(selector.platform.clone(), selector.id.clone()))
            .cloned();
        if found.is_none() {
            self.logger.warn(
                "Bot selector did not match a live connection",
                Some(&serde_json::json!({
                    "platform": selector.platform,
                    "id": selector.id,
                })),
            );
        }
        found
    }
}
