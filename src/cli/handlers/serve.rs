use crate::graphql::run_server;
use anyhow::{Context, Result};
use colored::Colorize;
use tokio::net::TcpListener;

use super::CommandContext;

pub fn handle_serve(ctx: CommandContext, host: Option<String>, port: Option<u16>) -> Result<()> {
    let host = host.unwrap_or_else(|| ctx.config.server.host.clone());
    let port = port.unwrap_or(ctx.config.server.port);
    let schema = ctx.schema();

    if let Some(snapshot) = ctx.store.snapshot() {
        tracing::info!(path = %snapshot.path().display(), "Persisting to snapshot");
    }

    tokio::runtime::Runtime::new()?.block_on(async {
        let listener = TcpListener::bind((host.as_str(), port))
            .await
            .with_context(|| format!("Failed to bind {}:{}", host, port))?;
        let addr = listener.local_addr()?;

        println!("{} {}", "Running on".green(), format!("http://{}/", addr).cyan());
        println!("GraphiQL: http://{}/", addr);

        run_server(listener, schema).await?;
        Ok::<(), anyhow::Error>(())
    })
}
