mod common;
use common::{MockConnection, MockTransport};

use hooksend::config::Config;
use hooksend::errors::HookErrorKind;
use hooksend::managers::commands::{CommandSurface, Invocation};
use hooksend::managers::webhook::WebhookManager;
use hooksend::services::logger::{LogLevel, Logger};
use hooksend::transport::registry::ConnectionRegistry;
use serde_json::{json, Map, Value};
use std::sync::Arc;

fn surface(
    config: Value,
    transport: Arc<MockTransport>,
) -> (CommandSurface, Arc<ConnectionRegistry>) {
    let config: Config = serde_json::from_value(config).expect("config");
    let logger = Logger::new("test", LogLevel::Error);
    let manager = Arc::new(WebhookManager::new(
        logger.clone(),
        transport,
        config.default_timeout_ms,
    ));
    let registry = Arc::new(ConnectionRegistry::new(logger.clone()));
    let surface = CommandSurface::new(logger, &config, manager, registry.clone());
    (surface, registry)
}

fn invocation(args: &[&str], options: Value, origin: &Arc<MockConnection>) -> Invocation {
    Invocation {
        identity: "42".to_string(),
        args: args.iter().map(|s| s.to_string()).collect(),
        options: options.as_object().cloned().unwrap_or_else(Map::new),
        reply_target: "room-1".to_string(),
        origin: Some(origin.clone()),
    }
}

#[tokio::test]
async fn end_to_end_success_reply_is_delivered_to_origin() {
    let transport = Arc::new(MockTransport::new().respond_with(200, json!({})));
    let (surface, _) = surface(
        json!({"webhooks": [{
            "command": "who",
            "url": "https://x/{user}",
            "method": "GET",
            "success_message": "ok {status}"
        }]}),
        transport,
    );
    let origin = Arc::new(MockConnection::new("stdio", "local"));

    let result = surface
        .invoke("who", &invocation(&[], json!({}), &origin))
        .await
        .expect("result");

    assert!(result.success);
    assert_eq!(result.message, "ok 200");
    assert_eq!(
        origin.deliveries(),
        vec![("room-1".to_string(), "ok 200".to_string())]
    );
}

#[tokio::test]
async fn missing_required_parameter_aborts_before_http() {
    let transport = Arc::new(MockTransport::new());
    let (surface, _) = surface(
        json!({"webhooks": [{
            "command": "deploy",
            "url": "https://x/deploy",
            "params": [{"name": "env", "required": true}]
        }]}),
        transport.clone(),
    );
    let origin = Arc::new(MockConnection::new("stdio", "local"));

    let result = surface
        .invoke("deploy", &invocation(&[], json!({}), &origin))
        .await
        .expect("result");

    assert!(!result.success);
    assert_eq!(
        result.message,
        "Missing required parameter: env (position 1)"
    );
    assert!(transport.calls().is_empty());
    assert_eq!(origin.deliveries().len(), 1);
}

#[tokio::test]
async fn named_option_overrides_positional_on_collision() {
    let transport = Arc::new(MockTransport::new().respond_with(200, json!({})));
    let (surface, _) = surface(
        json!({"webhooks": [{
            "command": "deploy",
            "url": "https://x/{env}",
            "method": "GET",
            "params": [{"name": "env", "required": true}],
            "options": [{"name": "env"}]
        }]}),
        transport.clone(),
    );
    let origin = Arc::new(MockConnection::new("stdio", "local"));

    surface
        .invoke("deploy", &invocation(&["dev"], json!({"env": "prod"}), &origin))
        .await
        .expect("result");

    assert_eq!(transport.calls()[0].url, "https://x/prod");
}

#[tokio::test]
async fn unknown_command_is_not_found() {
    let transport = Arc::new(MockTransport::new());
    let (surface, _) = surface(json!({"webhooks": []}), transport);
    let origin = Arc::new(MockConnection::new("stdio", "local"));

    let err = surface
        .invoke("nope", &invocation(&[], json!({}), &origin))
        .await
        .expect_err("should fail");
    assert_eq!(err.kind, HookErrorKind::NotFound);
}

#[tokio::test]
async fn empty_message_suppresses_delivery() {
    let transport = Arc::new(MockTransport::new().respond_with(200, json!({})));
    let (surface, _) = surface(
        json!({"webhooks": [{
            "command": "quiet",
            "url": "https://x/quiet",
            "enable_success_reply": false
        }]}),
        transport,
    );
    let origin = Arc::new(MockConnection::new("stdio", "local"));

    let result = surface
        .invoke("quiet", &invocation(&[], json!({}), &origin))
        .await
        .expect("result");

    assert!(result.success);
    assert!(result.message.is_empty());
    assert!(origin.deliveries().is_empty());
}

#[tokio::test]
async fn bot_selector_routes_to_registered_connection() {
    let transport = Arc::new(MockTransport::new().respond_with(200, json!({})));
    let (surface, registry) = surface(
        json!({"webhooks": [{
            "command": "who",
            "url": "https://x/who",
            "bot": {"platform": "qq", "id": "123"}
        }]}),
        transport,
    );
    let selected = Arc::new(MockConnection::new("qq", "123"));
    registry.register(selected.clone());
    let origin = Arc::new(MockConnection::new("stdio", "local"));

    surface
        .invoke("who", &invocation(&[], json!({}), &origin))
        .await
        .expect("result");

    assert_eq!(selected.deliveries().len(), 1);
    assert!(origin.deliveries().is_empty());
}

#[tokio::test]
async fn unresolvable_selector_falls_back_to_origin() {
    let transport = Arc::new(MockTransport::new().respond_with(200, json!({})));
    let (surface, _) = surface(
        json!({"webhooks": [{
            "command": "who",
            "url": "https://x/who",
            "bot": {"platform": "qq", "id": "missing"}
        }]}),
        transport,
    );
    let origin = Arc::new(MockConnection::new("stdio", "local"));

    surface
        .invoke("who", &invocation(&[], json!({}), &origin))
        .await
        .expect("result");

    assert_eq!(origin.deliveries().len(), 1);
}

#[tokio::test]
async fn list_renders_usage_descriptions_and_specs() {
    let transport = Arc::new(MockTransport::new());
    let (surface, _) = surface(
        json!({"webhooks": [{
            "command": "deploy",
            "description": "Deploy a service",
            "url": "https://x/deploy",
            "bot": {"platform": "qq", "id": "123"},
            "params": [
                {"name": "env", "required": true},
                {"name": "tag", "default": "latest"}
            ],
            "options": [{"name": "force"}]
        }]}),
        transport,
    );

    let listing = surface.list();
    assert!(listing.contains("/deploy <env> [tag] [--force <force>]"));
    assert!(listing.contains("Deploy a service"));
    assert!(listing.contains("bot: qq:123"));
    assert!(listing.contains("param: env (required)"));
    assert!(listing.contains("param: tag (optional), default \"latest\""));
    assert!(listing.contains("option: --force (force) (optional)"));
}

#[tokio::test]
async fn empty_configuration_lists_nothing() {
    let transport = Arc::new(MockTransport::new());
    let (surface, _) = surface(json!({"webhooks": []}), transport);
    assert_eq!(surface.list(), "No webhook commands are configured");
}
