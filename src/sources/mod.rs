pub mod explorer;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, warn};

use crate::config::SourcesConfig;
use crate::core::Transaction;
use explorer::ExplorerSource;

/// Trailing window covered by every fetch, in seconds.
pub const WINDOW_SECONDS: i64 = 7 * 24 * 3600;

/// One transaction-history provider in the fallback chain.
#[async_trait]
pub trait TxSource: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch transactions for `address` with `timestamp >= since`.
    async fn fetch(&self, address: &str, since: i64) -> Result<Vec<Transaction>, SourceError>;
}

#[derive(Debug)]
pub enum SourceError {
    Http(reqwest::Error),
    /// Non-2xx status from the explorer.
    Status(u16),
    /// Response body did not match the expected explorer shape.
    Malformed(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Http(e) => write!(f, "HTTP error: {e}"),
            SourceError::Status(code) => write!(f, "unexpected status: {code}"),
            SourceError::Malformed(e) => write!(f, "malformed payload: {e}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Build the default fallback chain from config: Blockscout first, then
/// BaseScan. Order matters; the first source with data wins.
pub fn default_sources(config: &SourcesConfig) -> Vec<Box<dyn TxSource>> {
    vec![
        Box::new(ExplorerSource::new("Blockscout", &config.blockscout_url, None)),
        Box::new(ExplorerSource::new(
            "BaseScan",
            &config.basescan_url,
            config.basescan_api_key.clone(),
        )),
    ]
}

/// Fetch the trailing 7 days of history for `address`, trying each source in
/// order. A source succeeds only by returning a non-empty filtered list;
/// failures and empty results fall through silently. When every source comes
/// up empty the wallet is treated as having no activity, never as an error.
pub async fn fetch_transactions(sources: &[Box<dyn TxSource>], address: &str) -> Vec<Transaction> {
    let since = Utc::now().timestamp() - WINDOW_SECONDS;

    for source in sources {
        match source.fetch(address, since).await {
            Ok(txs) if !txs.is_empty() => {
                debug!("{}: {} txs for {address}", source.name(), txs.len());
                return txs;
            }
            Ok(_) => {
                debug!("{}: no recent txs for {address}, trying next", source.name());
            }
            Err(e) => {
                warn!("{} failed for {address}: {e}, trying next", source.name());
            }
        }
    }

    Vec::new()
}
