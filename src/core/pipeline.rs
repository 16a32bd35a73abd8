use chrono::Utc;
use tracing::info;

use crate::activity::{self, catalog::ProtocolCatalog};
use crate::core::MoodResult;
use crate::mood::MoodEngine;
use crate::sources::{self, TxSource};

/// Run the full evaluation pipeline for one wallet: fetch the trailing week
/// of history, reduce it to the activity vector, classify. Stateless; each
/// call observes live chain data and is independent of every other call.
pub async fn evaluate_address(
    sources: &[Box<dyn TxSource>],
    catalog: &ProtocolCatalog,
    engine: &MoodEngine,
    address: &str,
) -> MoodResult {
    let txs = sources::fetch_transactions(sources, address).await;
    let vector = activity::analyze(&txs, address, catalog);
    let result = engine.classify(&vector, Utc::now());

    info!(
        "Evaluated {address}: {} txs -> mood={} rarity={} week={}",
        txs.len(),
        result.mood_name,
        result.rarity_id,
        result.week_index,
    );

    result
}
