pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use crate::activity::catalog::ProtocolCatalog;
use crate::chain::ChainClient;
use crate::config::Config;
use crate::mood::MoodEngine;
use crate::signer::MintAuthorizer;
use crate::sources::{self, TxSource};

/// Shared per-process state. Requests themselves are stateless; everything
/// here is immutable after startup.
pub struct AppState {
    pub sources: Vec<Box<dyn TxSource>>,
    pub catalog: ProtocolCatalog,
    pub engine: MoodEngine,
    /// None when `contract_address` is not configured; signing and debug
    /// endpoints then fail with a configuration error.
    pub chain: Option<ChainClient>,
    /// None when the signing key env var is unset.
    pub authorizer: Option<MintAuthorizer>,
}

impl AppState {
    /// Build state from config, logging (but tolerating) missing signing
    /// configuration: the mood endpoint works without it, signing endpoints
    /// hard-fail per request.
    pub fn from_config(config: &Config) -> Self {
        let contract = config
            .chain
            .contract_address
            .as_deref()
            .and_then(|addr| match addr.parse() {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    tracing::error!("Invalid contract_address in config: {e}");
                    None
                }
            });

        let chain = contract.and_then(|address| {
            match ChainClient::new(&config.chain.rpc_url, address) {
                Ok(client) => Some(client),
                Err(e) => {
                    tracing::error!("Chain client unavailable: {e}");
                    None
                }
            }
        });
        if chain.is_none() {
            tracing::warn!("No usable contract address; signing endpoints disabled");
        }

        let authorizer = match (config.signer_key(), contract) {
            (Some(key), Some(address)) => {
                match MintAuthorizer::new(&key, config.chain.chain_id, address) {
                    Ok(authorizer) => {
                        tracing::info!("Mint authority: {}", authorizer.address());
                        Some(authorizer)
                    }
                    Err(e) => {
                        tracing::error!("Signing key rejected: {e}");
                        None
                    }
                }
            }
            _ => {
                tracing::warn!("Signing key or contract missing; mint-auth disabled");
                None
            }
        };

        Self {
            sources: sources::default_sources(&config.sources),
            catalog: ProtocolCatalog::from_config(&config.catalog),
            engine: MoodEngine::new(),
            chain,
            authorizer,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/mood", get(handlers::mood))
        .route("/mint-auth", post(handlers::mint_auth))
        .route("/debug/owner", get(handlers::debug_owner))
        .route("/debug/simulate-mint", post(handlers::simulate_mint))
        .with_state(state)
        .layer(cors)
}
