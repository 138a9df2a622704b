use crate::app::App;
use crate::constants::commands;
use crate::errors::HookError;
use crate::host::parser::parse_line;
use crate::managers::commands::Invocation;
use crate::transport::Connection;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const IDENTITY_ENV: &str = "HOOKSEND_USER";

/// Reference command host: one command per line on stdin, replies on stdout.
struct StdioConnection;

#[async_trait]
impl Connection for StdioConnection {
    fn platform(&self) -> &str {
        "stdio"
    }

    fn id(&self) -> &str {
        "local"
    }

    async fn deliver(&self, _target: &str, text: &str) -> Result<(), HookError> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(text.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
        Ok(())
    }
}

fn resolve_identity() -> String {
    std::env::var(IDENTITY_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "local".to_string())
}

pub async fn run_stdio(app: &App) -> Result<(), HookError> {
    let connection: Arc<dyn Connection> = Arc::new(StdioConnection);
    app.connections.register(connection.clone());
    let identity = resolve_identity();

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    while let Some(line) = lines.next_line().await? {
        let Some(parsed) = parse_line(&line) else {
            continue;
        };
        if parsed.trigger == commands::LIST_TRIGGER {
            connection.deliver("stdio", &app.surface.list()).await?;
            continue;
        }
        let invocation = Invocation {
            identity: identity.clone(),
            args: parsed.args,
            options: parsed.options,
            reply_target: "stdio".to_string(),
            origin: Some(connection.clone()),
        };
        if let Err(err) = app.surface.invoke(&parsed.trigger, &invocation).await {
            connection.deliver("stdio", &err.message).await?;
        }
    }
    Ok(())
}
