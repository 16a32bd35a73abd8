use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::core::{ActivityVector, MoodScores, Rarity};

/// Compute the four mood scores from the activity vector, each clamped to 100.
pub fn compute_scores(v: &ActivityVector) -> MoodScores {
    MoodScores {
        activity: (v.tx_count * 2 + v.active_days * 10).min(100),
        defi: (v.swaps * 8 + v.lending_interactions * 10 + v.lp_interactions * 12).min(100),
        collector: (v.nft_mints * 15 + v.marketplace_interactions * 10).min(100),
        risk: (v.approvals * 12 + v.unique_contracts * 3).min(100),
    }
}

/// Rarity gates combine an aggregate score floor with a raw transaction-count
/// floor, so a few heavily-weighted categories cannot inflate rarity alone.
pub fn rarity(scores: &MoodScores, tx_count: u32) -> Rarity {
    let total = scores.activity + scores.defi + scores.collector;
    if total > 200 && tx_count > 20 {
        Rarity::Legendary
    } else if total > 100 && tx_count > 10 {
        Rarity::Rare
    } else {
        Rarity::Common
    }
}

const WEEK_SECONDS: i64 = 7 * 24 * 3600;

/// Signing-epoch week counter: ceil(seconds since Jan 1 UTC / one week).
///
/// Not ISO week numbering, and it resets discontinuously at the year
/// boundary. The on-chain verifier re-derives this value, so the formula
/// must stay bit-exact.
pub fn week_index(now: DateTime<Utc>) -> u32 {
    let start = NaiveDate::from_ymd_opt(now.year(), 1, 1)
        .unwrap_or_default()
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .and_utc();
    let elapsed = (now - start).num_seconds().max(0);
    ((elapsed + WEEK_SECONDS - 1) / WEEK_SECONDS) as u32
}
