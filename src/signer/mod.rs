use alloy::primitives::{Address, B256, U256};
use alloy::signers::Signer;
use alloy::signers::local::PrivateKeySigner;
use alloy::sol;
use alloy::sol_types::{Eip712Domain, SolStruct};
use serde::Serialize;
use serde_json::{Value, json};
use std::borrow::Cow;

use crate::core::MoodResult;

/// EIP-712 domain constants. Changing either invalidates every outstanding
/// authorization, which is the point: signatures are bound to this exact
/// app and version.
pub const DOMAIN_NAME: &str = "Wallet Mood Ring";
pub const DOMAIN_VERSION: &str = "1";

sol! {
    /// The typed struct the contract verifies. Field order is part of the
    /// type hash; keep it in sync with the contract.
    struct MintAuth {
        address to;
        uint256 weekIndex;
        uint8 moodId;
        uint32 tx7d;
        uint32 swaps7d;
        uint32 approvals7d;
        uint8 rarityId;
    }
}

/// A signed authorization as returned to the client: everything a wallet
/// library needs to submit the mint, with `weekIndex` stringified since it
/// is a uint256 on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct SignedMintAuth {
    pub signature: String,
    pub domain: Value,
    pub types: Value,
    pub value: Value,
}

#[derive(Debug)]
pub enum SignerError {
    InvalidKey(String),
    /// The configured key does not control the contract. Details are for
    /// operator logs only.
    AuthorityMismatch { signer: Address, onchain: Address },
    Signing(String),
}

impl std::fmt::Display for SignerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignerError::InvalidKey(e) => write!(f, "invalid signing key: {e}"),
            SignerError::AuthorityMismatch { signer, onchain } => {
                write!(f, "signer {signer} does not match on-chain authority {onchain}")
            }
            SignerError::Signing(e) => write!(f, "signing failed: {e}"),
        }
    }
}

impl std::error::Error for SignerError {}

/// Holds the authority key and the fixed EIP-712 domain, and produces
/// signed mint authorizations.
pub struct MintAuthorizer {
    signer: PrivateKeySigner,
    chain_id: u64,
    verifying_contract: Address,
    domain: Eip712Domain,
}

impl MintAuthorizer {
    pub fn new(
        private_key: &str,
        chain_id: u64,
        verifying_contract: Address,
    ) -> Result<Self, SignerError> {
        let signer: PrivateKeySigner = private_key
            .trim()
            .parse()
            .map_err(|e| SignerError::InvalidKey(format!("{e}")))?;
        let domain = Eip712Domain::new(
            Some(Cow::Borrowed(DOMAIN_NAME)),
            Some(Cow::Borrowed(DOMAIN_VERSION)),
            Some(U256::from(chain_id)),
            Some(verifying_contract),
            None,
        );
        Ok(Self { signer, chain_id, verifying_contract, domain })
    }

    /// Address derived from the configured key; must equal the contract's
    /// registered authority for signatures to verify.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Fail closed when the on-chain authority differs from our key. Called
    /// with a freshly-read owner so key rotations are caught immediately.
    pub fn verify_authority(&self, onchain: Address) -> Result<(), SignerError> {
        let signer = self.address();
        if signer != onchain {
            return Err(SignerError::AuthorityMismatch { signer, onchain });
        }
        Ok(())
    }

    fn build_payload(&self, to: Address, result: &MoodResult) -> MintAuth {
        MintAuth {
            to,
            weekIndex: U256::from(result.week_index),
            moodId: result.mood_id,
            tx7d: result.stats.tx7d,
            swaps7d: result.stats.swaps7d,
            approvals7d: result.stats.approvals7d,
            rarityId: result.rarity_id,
        }
    }

    /// Sign the EIP-712 hash of the mint payload.
    pub async fn sign(&self, to: Address, result: &MoodResult) -> Result<(String, B256), SignerError> {
        let payload = self.build_payload(to, result);
        let hash = payload.eip712_signing_hash(&self.domain);
        let signature = self
            .signer
            .sign_hash(&hash)
            .await
            .map_err(|e| SignerError::Signing(e.to_string()))?;
        Ok((format!("0x{}", alloy::hex::encode(signature.as_bytes())), hash))
    }

    /// Produce the full authorization response for a wallet client.
    pub async fn authorize(&self, to: Address, result: &MoodResult) -> Result<SignedMintAuth, SignerError> {
        let (signature, _) = self.sign(to, result).await?;
        Ok(SignedMintAuth {
            signature,
            domain: json!({
                "name": DOMAIN_NAME,
                "version": DOMAIN_VERSION,
                "chainId": self.chain_id,
                "verifyingContract": self.verifying_contract,
            }),
            types: mint_auth_types(),
            value: json!({
                "to": to,
                "weekIndex": result.week_index.to_string(),
                "moodId": result.mood_id,
                "tx7d": result.stats.tx7d,
                "swaps7d": result.stats.swaps7d,
                "approvals7d": result.stats.approvals7d,
                "rarityId": result.rarity_id,
            }),
        })
    }
}

/// The EIP-712 type table, as wallet libraries expect it.
fn mint_auth_types() -> Value {
    json!({
        "MintAuth": [
            { "name": "to", "type": "address" },
            { "name": "weekIndex", "type": "uint256" },
            { "name": "moodId", "type": "uint8" },
            { "name": "tx7d", "type": "uint32" },
            { "name": "swaps7d", "type": "uint32" },
            { "name": "approvals7d", "type": "uint32" },
            { "name": "rarityId", "type": "uint8" },
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MoodScores, MoodStats};

    const TEST_KEY: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
    const CONTRACT: &str = "0x2222222222222222222222222222222222222222";

    fn authorizer() -> MintAuthorizer {
        MintAuthorizer::new(TEST_KEY, 8453, CONTRACT.parse().unwrap()).unwrap()
    }

    fn mood_result() -> MoodResult {
        MoodResult {
            mood_id: 1,
            mood_name: "Degen Mode".to_string(),
            scores: MoodScores { activity: 60, defi: 0, collector: 0, risk: 100 },
            stats: MoodStats {
                tx7d: 30,
                swaps7d: 0,
                approvals7d: 20,
                bridges7d: 0,
                unique_contracts: 15,
                nft_mints: 0,
            },
            reasons: vec![
                "30 tx in 7 days".to_string(),
                "20 approvals".to_string(),
                "15 unique contracts".to_string(),
            ],
            week_index: 35,
            rarity_id: 0,
        }
    }

    #[test]
    fn rejects_garbage_key() {
        assert!(matches!(
            MintAuthorizer::new("not-a-key", 8453, CONTRACT.parse().unwrap()),
            Err(SignerError::InvalidKey(_))
        ));
    }

    #[test]
    fn authority_check_passes_for_own_address() {
        let auth = authorizer();
        assert!(auth.verify_authority(auth.address()).is_ok());
    }

    #[test]
    fn authority_mismatch_fails_closed() {
        let auth = authorizer();
        let other: Address = "0x3333333333333333333333333333333333333333".parse().unwrap();
        match auth.verify_authority(other) {
            Err(SignerError::AuthorityMismatch { signer, onchain }) => {
                assert_eq!(signer, auth.address());
                assert_eq!(onchain, other);
            }
            other => panic!("expected AuthorityMismatch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn signature_recovers_to_signer_address() {
        let auth = authorizer();
        let to: Address = "0x1111111111111111111111111111111111111111".parse().unwrap();
        let (sig_hex, hash) = auth.sign(to, &mood_result()).await.unwrap();

        assert!(sig_hex.starts_with("0x"));
        assert_eq!(sig_hex.len(), 2 + 65 * 2);

        let bytes = alloy::hex::decode(&sig_hex).unwrap();
        let signature = alloy::primitives::Signature::from_raw(&bytes).unwrap();
        let recovered = signature.recover_address_from_prehash(&hash).unwrap();
        assert_eq!(recovered, auth.address());
    }

    #[tokio::test]
    async fn signing_is_deterministic_per_payload() {
        let auth = authorizer();
        let to: Address = "0x1111111111111111111111111111111111111111".parse().unwrap();
        let (a, _) = auth.sign(to, &mood_result()).await.unwrap();
        let (b, _) = auth.sign(to, &mood_result()).await.unwrap();
        assert_eq!(a, b);

        let mut other = mood_result();
        other.week_index += 1;
        let (c, _) = auth.sign(to, &other).await.unwrap();
        assert_ne!(a, c);
    }

    #[tokio::test]
    async fn authorization_serializes_week_index_as_string() {
        let auth = authorizer();
        let to: Address = "0x1111111111111111111111111111111111111111".parse().unwrap();
        let signed = auth.authorize(to, &mood_result()).await.unwrap();

        assert_eq!(signed.value["weekIndex"], serde_json::json!("35"));
        assert_eq!(signed.value["moodId"], serde_json::json!(1));
        assert_eq!(signed.domain["name"], serde_json::json!(DOMAIN_NAME));
        assert_eq!(signed.domain["chainId"], serde_json::json!(8453));
        assert_eq!(signed.types["MintAuth"].as_array().unwrap().len(), 7);
    }

    #[test]
    fn type_hash_matches_declared_schema() {
        let payload = MintAuth {
            to: Address::ZERO,
            weekIndex: U256::from(1u32),
            moodId: 0,
            tx7d: 0,
            swaps7d: 0,
            approvals7d: 0,
            rarityId: 0,
        };
        assert_eq!(
            payload.eip712_type_hash(),
            alloy::primitives::keccak256(
                "MintAuth(address to,uint256 weekIndex,uint8 moodId,uint32 tx7d,uint32 swaps7d,uint32 approvals7d,uint8 rarityId)"
            )
        );
    }
}
