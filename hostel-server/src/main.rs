use hostel_server::{Config, Server, ServerState, init_logger, print_banner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment and configuration
    dotenv::dotenv().ok();
    let config = Config::from_env()?;

    // 2. Logging
    init_logger(&config.log_level, config.log_json, config.log_dir.as_deref())?;

    print_banner();
    tracing::info!(
        environment = %config.environment,
        database = %config.database_path,
        "Hostel server starting..."
    );

    // 3. State (opens the database and runs migrations)
    let state = ServerState::initialize(&config).await?;

    // 4. HTTP server (starts the background tasks, stops them on ctrl-c)
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
