use anyhow::Context;
use clap::Args;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::database::{DatabaseManager, Repositories};

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    #[arg(long, help = "Port to listen on (overrides SERVER_PORT)")]
    pub port: Option<u16>,
}

pub async fn handle(args: ServeArgs, config: &AppConfig) -> anyhow::Result<()> {
    config.validate()?;
    info!("Starting CS156 example API in {:?} mode", config.environment);

    let repos = match config.database.url {
        Some(_) => {
            let database = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to database")?;
            Repositories::postgres(database)
        }
        None => {
            warn!("DATABASE_URL not set; using the in-memory store (data is lost on exit)");
            Repositories::in_memory()
        }
    };
    let database = repos.database.clone();

    let app = crate::app(repos, &config.security);

    let bind_addr = match args.port {
        Some(port) => format!("{}:{}", config.server.host, port),
        None => config.bind_addr(),
    };
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(database) = database {
        database.close().await;
    }
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
