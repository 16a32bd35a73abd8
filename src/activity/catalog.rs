use std::collections::HashSet;

use crate::config::CatalogConfig;

/// ERC-20 `approve(address,uint256)` selector.
pub const APPROVE_SELECTOR: &str = "0x095ea7b3";

/// Known protocol addresses and function selectors used to classify
/// transactions. Everything is stored lowercased so matching is a plain
/// set lookup; the built-in tables can be extended through `[catalog]`
/// config without touching the analyzer.
#[derive(Debug, Clone)]
pub struct ProtocolCatalog {
    pub swap_routers: HashSet<String>,
    pub nft_marketplaces: HashSet<String>,
    pub bridges: HashSet<String>,
    pub lending_protocols: HashSet<String>,
    pub swap_selectors: HashSet<String>,
    pub mint_selectors: HashSet<String>,
}

// DEX/router addresses on Base.
const SWAP_ROUTERS: &[&str] = &[
    "0x2626664c2603336e57b271c5c0b26f421741e481", // Uniswap V3 Router
    "0x4752ba5dbc23f44d87826276bf6fd6b1c372ad24", // Uniswap V2 Router
    "0x7087e08107df932a7b3c3e1a4e8c25c3c1c8b5d1", // Aerodrome Router
    "0x6bded42c6da8fbf0d2ba55b2fa120c5e0c8d7891", // BaseSwap Router
    "0x327df1e6de05895d2ab08513aadd9313fe505d86", // SwapRouter02
];

// NFT marketplace addresses on Base.
const NFT_MARKETPLACES: &[&str] = &[
    "0x00000000000000adc04c56bf30ac9d3c0aaf14dc", // OpenSea Seaport
    "0x00000000000001ad428e4906ae43d8f9852d0dd6", // OpenSea Seaport 1.1
    "0x74312363e45dcb76b5c1a7fa813cfcdf319575c1", // Zora
];

// Bridge addresses on Base.
const BRIDGES: &[&str] = &[
    "0x4200000000000000000000000000000000000010", // Base Bridge
    "0x3154cf16ccdb4c6b922751f92d1bd6b9e8f4c8bd", // Stargate Bridge
    "0x4c2f7092c2ae51d986befea37848013006134268", // Hop Bridge
];

// Lending protocol addresses on Base.
const LENDING_PROTOCOLS: &[&str] = &[
    "0xa238dd80c259a72e81d7e4664a9801593f98d1c5", // Aave
];

// Swap function selectors. Catches aggregators and routers that are not in
// the address table above.
const SWAP_SELECTORS: &[&str] = &[
    "0x38ed1739", // swapExactTokensForTokens
    "0x7ff36ab5", // swapExactETHForTokens
    "0x18cbafe5", // swapExactTokensForETH
    "0x04e45aaf", // exactInputSingle (SwapRouter02)
    "0x414bf389", // exactInputSingle (V3 router)
    "0xc04b8d59", // exactInput
    "0x5ae401dc", // multicall(deadline,bytes[])
    "0x3593564c", // execute (Universal Router)
];

// Mint-like function selectors.
const MINT_SELECTORS: &[&str] = &[
    "0x1249c58b", // mint()
    "0x40c10f19", // mint(address,uint256)
    "0xa0712d68", // mint(uint256)
];

fn build_set(builtin: &[&str], extra: &[String]) -> HashSet<String> {
    builtin
        .iter()
        .map(|s| s.to_lowercase())
        .chain(extra.iter().map(|s| s.to_lowercase()))
        .collect()
}

impl Default for ProtocolCatalog {
    fn default() -> Self {
        Self::from_config(&CatalogConfig::default())
    }
}

impl ProtocolCatalog {
    /// Build the catalog from the built-in tables plus config extensions.
    pub fn from_config(extra: &CatalogConfig) -> Self {
        let catalog = Self {
            swap_routers: build_set(SWAP_ROUTERS, &extra.swap_routers),
            nft_marketplaces: build_set(NFT_MARKETPLACES, &extra.nft_marketplaces),
            bridges: build_set(BRIDGES, &extra.bridges),
            lending_protocols: build_set(LENDING_PROTOCOLS, &extra.lending_protocols),
            swap_selectors: build_set(SWAP_SELECTORS, &extra.swap_selectors),
            mint_selectors: build_set(MINT_SELECTORS, &extra.mint_selectors),
        };
        tracing::debug!(
            "Protocol catalog: {} routers, {} marketplaces, {} bridges, {} lenders",
            catalog.swap_routers.len(),
            catalog.nft_marketplaces.len(),
            catalog.bridges.len(),
            catalog.lending_protocols.len(),
        );
        catalog
    }
}
