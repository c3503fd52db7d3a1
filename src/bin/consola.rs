use std::io;

use tracing::info;

use inventory_service::client::{console::Console, InventoryClient};
use inventory_service::config::ClientConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Logs go to stderr so they never interleave with the menu
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    let config = ClientConfig::from_env()?;
    let client = InventoryClient::new(&config)?;
    info!(base_url = client.base_url(), "Console client started");

    let stdin = io::stdin();
    Console::new(stdin.lock(), io::stdout()).run(&client).await?;

    Ok(())
}
