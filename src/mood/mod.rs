pub mod rules;
pub mod score;

use chrono::{DateTime, Utc};

use crate::core::{ActivityVector, Mood, MoodResult, MoodStats};
use rules::MoodRule;

/// Applies the mood decision list and assembles the full classification.
pub struct MoodEngine {
    rules: Vec<Box<dyn MoodRule + Send + Sync>>,
}

impl Default for MoodEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MoodEngine {
    pub fn new() -> Self {
        Self {
            rules: rules::default_rules(),
        }
    }

    /// Total, deterministic classification: every vector maps to exactly one
    /// mood. `now` only feeds the week-index epoch tag.
    pub fn classify(&self, vector: &ActivityVector, now: DateTime<Utc>) -> MoodResult {
        let scores = score::compute_scores(vector);

        let mood = self
            .rules
            .iter()
            .find_map(|rule| {
                let outcome = rule.evaluate(vector, &scores);
                if let Some(mood) = outcome {
                    tracing::debug!("Mood rule '{}' matched: {:?}", rule.name(), mood);
                }
                outcome
            })
            .unwrap_or(Mood::Quiet);

        let rarity = score::rarity(&scores, vector.tx_count);

        MoodResult {
            mood_id: mood.id(),
            mood_name: mood.name().to_string(),
            scores,
            stats: MoodStats {
                tx7d: vector.tx_count,
                swaps7d: vector.swaps,
                approvals7d: vector.approvals,
                bridges7d: vector.bridge_count,
                unique_contracts: vector.unique_contracts,
                nft_mints: vector.nft_mints,
            },
            reasons: build_reasons(vector, mood),
            week_index: score::week_index(now),
            rarity_id: rarity.id(),
        }
    }
}

/// Fixed messages for a wallet with nothing to report.
const DORMANT_REASONS: [&str; 3] = [
    "No transactions in 7 days",
    "Wallet is dormant",
    "Time to explore Base!",
];

/// Emit up to three human-readable stats in fixed priority order, then pad
/// to exactly three with a mood-appropriate filler.
fn build_reasons(v: &ActivityVector, mood: Mood) -> Vec<String> {
    let candidates = [
        (v.tx_count, format!("{} tx in 7 days", v.tx_count)),
        (v.swaps, format!("{} swaps", v.swaps)),
        (v.approvals, format!("{} approvals", v.approvals)),
        (v.nft_mints, format!("{} NFT mints", v.nft_mints)),
        (v.bridge_count, format!("{} bridges", v.bridge_count)),
        (v.unique_contracts, format!("{} unique contracts", v.unique_contracts)),
        (v.active_days, format!("{} active days", v.active_days)),
    ];

    let mut reasons: Vec<String> = Vec::with_capacity(3);
    for (count, text) in candidates {
        if reasons.len() == 3 {
            break;
        }
        if count > 0 {
            reasons.push(text);
        }
    }

    if reasons.is_empty() {
        return DORMANT_REASONS.iter().map(|s| s.to_string()).collect();
    }

    let filler = if mood == Mood::Quiet {
        "Ready for your first Base tx"
    } else {
        "Active on Base"
    };
    while reasons.len() < 3 {
        reasons.push(filler.to_string());
    }

    reasons
}
