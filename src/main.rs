mod activity;
mod chain;
mod config;
mod core;
mod mood;
mod server;
mod signer;
mod sources;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() {
    // Secrets come from the environment, optionally via .env in dev.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("moodring=info".parse().unwrap()),
        )
        .init();

    tracing::info!("moodring starting...");

    let config = Config::load("config.toml");
    tracing::info!(
        "Chain: id={} rpc={} contract={}",
        config.chain.chain_id,
        config.chain.rpc_url,
        config.chain.contract_address.as_deref().unwrap_or("(not set)"),
    );

    let state = Arc::new(server::AppState::from_config(&config));
    let app = server::router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .expect("Failed to bind server address");
    tracing::info!("Listening on {}", config.server.bind_addr);
    tracing::info!("  GET  /mood?address=0x...   - classify a wallet");
    tracing::info!("  POST /mint-auth            - signed weekly mint authorization");
    tracing::info!("  GET  /debug/owner          - authority check diagnostic");
    tracing::info!("  POST /debug/simulate-mint  - preflight a mint on-chain");

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
