use serde::Deserialize;
use std::path::Path;

/// Environment variable holding the EIP-712 authority key. Never read from
/// the config file so the secret stays out of checked-in configuration.
pub const SIGNER_KEY_ENV: &str = "SIGNER_PRIVATE_KEY";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub chain: ChainConfig,
    pub sources: SourcesConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ChainConfig {
    pub rpc_url: String,
    pub chain_id: u64,
    /// Badge contract address. Signing endpoints hard-fail without it.
    pub contract_address: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SourcesConfig {
    pub blockscout_url: String,
    pub basescan_url: String,
    pub basescan_api_key: Option<String>,
}

/// Extensions to the built-in protocol tables. Entries are lowercased on
/// load; addresses are full 0x strings, selectors are 4-byte 0x prefixes.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct CatalogConfig {
    pub swap_routers: Vec<String>,
    pub nft_marketplaces: Vec<String>,
    pub bridges: Vec<String>,
    pub lending_protocols: Vec<String>,
    pub swap_selectors: Vec<String>,
    pub mint_selectors: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            chain: ChainConfig::default(),
            sources: SourcesConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".into(),
        }
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://mainnet.base.org".into(),
            chain_id: 8453,
            contract_address: None,
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            blockscout_url: "https://base.blockscout.com/api".into(),
            basescan_url: "https://api.basescan.org/api".into(),
            basescan_api_key: None,
        }
    }
}

impl Config {
    /// Load config from a TOML file. Falls back to defaults if file doesn't exist.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("Config file {} not found, using defaults", path.display());
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Config loaded from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {e}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Read the signing key from the environment. None when unset or blank.
    pub fn signer_key(&self) -> Option<String> {
        std::env::var(SIGNER_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}
