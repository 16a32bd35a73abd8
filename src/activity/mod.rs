pub mod catalog;

use std::collections::HashSet;

use chrono::DateTime;

use crate::core::{ActivityVector, Transaction};
use catalog::{APPROVE_SELECTOR, ProtocolCatalog};

/// Call data longer than this (hex chars) on a swap is treated as a
/// liquidity-provision interaction rather than a plain swap.
const LP_CALLDATA_THRESHOLD: usize = 500;

/// Minimum call-data length for mint detection; anything shorter is a bare
/// transfer or selector-less call.
const MIN_MINT_CALLDATA: usize = 10;

/// Reduce a transaction list to the fixed activity vector. Pure; the
/// `_address` parameter is kept for signature symmetry with the fetcher.
pub fn analyze(txs: &[Transaction], _address: &str, catalog: &ProtocolCatalog) -> ActivityVector {
    let mut active_days = HashSet::new();
    let mut unique_contracts = HashSet::new();
    let mut swaps = 0u32;
    let mut approvals = 0u32;
    let mut nft_mints = 0u32;
    let mut marketplace_interactions = 0u32;
    let mut bridge_count = 0u32;
    let mut lending_interactions = 0u32;
    let mut lp_interactions = 0u32;

    for tx in txs {
        if let Some(dt) = DateTime::from_timestamp(tx.timestamp, 0) {
            active_days.insert(dt.date_naive());
        }

        let input = tx.input.to_lowercase();
        let selector = input.get(..10);

        // A swap is recognized by recipient address OR call-data selector,
        // but counted once per transaction.
        let mut is_swap = selector.is_some_and(|s| catalog.swap_selectors.contains(s));

        if let Some(to) = tx.to.as_deref().filter(|t| !t.is_empty()) {
            let to = to.to_lowercase();
            if catalog.swap_routers.contains(&to) {
                is_swap = true;
            }
            if catalog.nft_marketplaces.contains(&to) {
                marketplace_interactions += 1;
            }
            if catalog.bridges.contains(&to) {
                bridge_count += 1;
            }
            if catalog.lending_protocols.contains(&to) {
                lending_interactions += 1;
            }

            if tx.value == "0" && input.len() > MIN_MINT_CALLDATA {
                if selector.is_some_and(|s| catalog.mint_selectors.contains(s)) {
                    nft_mints += 1;
                }
            }

            unique_contracts.insert(to);
        }

        if is_swap {
            swaps += 1;
            if input.len() > LP_CALLDATA_THRESHOLD {
                lp_interactions += 1;
            }
        }

        if input.starts_with(APPROVE_SELECTOR) {
            approvals += 1;
        }
    }

    ActivityVector {
        tx_count: txs.len() as u32,
        active_days: active_days.len() as u32,
        swaps,
        approvals,
        // Cap mint count to suppress selector collisions from unrelated
        // contracts.
        nft_mints: nft_mints.min(marketplace_interactions + 5),
        marketplace_interactions,
        bridge_count,
        unique_contracts: unique_contracts.len() as u32,
        lending_interactions,
        lp_interactions,
    }
}
