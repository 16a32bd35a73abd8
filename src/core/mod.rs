pub mod pipeline;

use serde::{Deserialize, Serialize};

/// A normalized transaction from a block explorer API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: String,
    pub from: String,
    /// Absent for contract-creation transactions.
    pub to: Option<String>,
    /// Decimal string, wei.
    pub value: String,
    /// 0x-prefixed call data.
    pub input: String,
    /// Unix seconds.
    pub timestamp: i64,
}

/// Derived activity counts over the trailing 7-day window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityVector {
    pub tx_count: u32,
    pub active_days: u32,
    pub swaps: u32,
    pub approvals: u32,
    pub nft_mints: u32,
    pub marketplace_interactions: u32,
    pub bridge_count: u32,
    pub unique_contracts: u32,
    pub lending_interactions: u32,
    pub lp_interactions: u32,
}

/// The four mood scores, each clamped to 0-100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodScores {
    pub activity: u32,
    pub defi: u32,
    pub collector: u32,
    pub risk: u32,
}

/// The five mood classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Builder,
    Degen,
    Collector,
    BridgeTourist,
    Quiet,
}

impl Mood {
    pub fn id(self) -> u8 {
        match self {
            Mood::Builder => 0,
            Mood::Degen => 1,
            Mood::Collector => 2,
            Mood::BridgeTourist => 3,
            Mood::Quiet => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mood::Builder => "Builder Mode",
            Mood::Degen => "Degen Mode",
            Mood::Collector => "Collector Mode",
            Mood::BridgeTourist => "Bridge Tourist",
            Mood::Quiet => "Quiet Mode",
        }
    }
}

/// Badge scarcity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Legendary,
}

impl Rarity {
    pub fn id(self) -> u8 {
        match self {
            Rarity::Common => 0,
            Rarity::Rare => 1,
            Rarity::Legendary => 2,
        }
    }
}

/// The subset of the activity vector exposed to clients and the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodStats {
    pub tx7d: u32,
    pub swaps7d: u32,
    pub approvals7d: u32,
    pub bridges7d: u32,
    pub unique_contracts: u32,
    pub nft_mints: u32,
}

/// Classification output for one wallet, one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodResult {
    pub mood_id: u8,
    pub mood_name: String,
    pub scores: MoodScores,
    pub stats: MoodStats,
    pub reasons: Vec<String>,
    pub week_index: u32,
    pub rarity_id: u8,
}
