use tally_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment setup (dotenv, logging)
    setup_environment().map_err(|e| anyhow::anyhow!(e.to_string()))?;

    print_banner();

    tracing::info!("📒 Tally server starting...");

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize state: open store, seed, recover pending writes
    let state = ServerState::initialize(&config)?;

    // 4. Serve
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
