use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::sol;

use crate::core::MoodResult;

sol! {
    #[sol(rpc)]
    interface IMoodBadge {
        function owner() external view returns (address);
        function hasMintedWeek(address user, uint256 weekIndex) external view returns (bool);
        function mint(
            address to,
            uint256 weekIndex,
            uint8 moodId,
            uint32 tx7d,
            uint32 swaps7d,
            uint32 approvals7d,
            uint8 rarityId,
            bytes signature
        ) external;
    }
}

/// Read-side client for the badge contract. Every call hits the RPC node
/// directly; nothing is cached, so authority rotations are observed
/// immediately.
pub struct ChainClient {
    provider: DynProvider,
    contract: Address,
}

#[derive(Debug)]
pub enum ChainError {
    InvalidRpcUrl(String),
    Rpc(String),
}

impl std::fmt::Display for ChainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainError::InvalidRpcUrl(e) => write!(f, "invalid RPC URL: {e}"),
            ChainError::Rpc(e) => write!(f, "RPC error: {e}"),
        }
    }
}

impl std::error::Error for ChainError {}

impl ChainClient {
    pub fn new(rpc_url: &str, contract: Address) -> Result<Self, ChainError> {
        let url: reqwest::Url = rpc_url
            .parse()
            .map_err(|e| ChainError::InvalidRpcUrl(format!("{e}")))?;
        let provider = ProviderBuilder::new().connect_http(url).erased();
        Ok(Self { provider, contract })
    }

    pub fn contract_address(&self) -> Address {
        self.contract
    }

    /// The authority address currently registered on the contract.
    pub async fn owner(&self) -> Result<Address, ChainError> {
        let badge = IMoodBadge::new(self.contract, self.provider.clone());
        badge
            .owner()
            .call()
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))
    }

    /// Whether `user` already claimed a badge for `week_index`.
    pub async fn has_minted_week(&self, user: Address, week_index: u32) -> Result<bool, ChainError> {
        let badge = IMoodBadge::new(self.contract, self.provider.clone());
        badge
            .hasMintedWeek(user, U256::from(week_index))
            .call()
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))
    }

    /// Dry-run the mint call as `to`. Returns the revert message on failure;
    /// used only for the operator diagnostic endpoint.
    pub async fn simulate_mint(
        &self,
        to: Address,
        result: &MoodResult,
        signature: Bytes,
    ) -> Result<(), ChainError> {
        let badge = IMoodBadge::new(self.contract, self.provider.clone());
        badge
            .mint(
                to,
                U256::from(result.week_index),
                result.mood_id,
                result.stats.tx7d,
                result.stats.swaps7d,
                result.stats.approvals7d,
                result.rarity_id,
                signature,
            )
            .from(to)
            .call()
            .await
            .map(|_| ())
            .map_err(|e| ChainError::Rpc(e.to_string()))
    }
}
