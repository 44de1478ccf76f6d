mod api;
mod config;
mod dynamodb;
mod logging;


use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::info;

use crate::api::{AlarmSink, AppState, Reporter, VictorOps};
use crate::config::Config;
use crate::dynamodb::{DynamoDb, Store, Table};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    logging::init_logging(config.dev)?;

    info!("DynamoDB API starting");
    info!("Are we working on dev? {}", config.dev);

    let sdk_config = config.aws_config().await;
    let store: Arc<dyn Store> = Arc::new(DynamoDb::new(&sdk_config));

    let table = Table::new(&config.default_table, &config.default_table_key);
    dynamodb::ensure_table(store.as_ref(), &table)
        .await
        .with_context(|| format!("Error preparing table {}", table.name()))?;

    let sink = config
        .alarm_url
        .as_deref()
        .map(|url| Arc::new(VictorOps::new(url)) as Arc<dyn AlarmSink>);
    if sink.is_none() {
        info!("ALARM_URL not set, failures will only be logged");
    }

    let state = AppState::new(store, Reporter::new(sink), config.dev);
    let app = api::router(state);

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
