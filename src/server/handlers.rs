use std::sync::Arc;

use alloy::primitives::{Address, Bytes};
use axum::Json;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::AppState;
use super::error::{ApiError, friendly_revert};
use crate::chain::ChainClient;
use crate::core::{MoodResult, pipeline};
use crate::mood::score::week_index;
use crate::signer::MintAuthorizer;

#[derive(Debug, Deserialize)]
pub struct AddressQuery {
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddressBody {
    pub address: String,
}

/// Strict address validation: 0x prefix plus 40 hex chars, any case.
fn parse_address(raw: &str) -> Result<Address, ApiError> {
    if !raw.starts_with("0x") || raw.len() != 42 {
        return Err(ApiError::InvalidAddress);
    }
    raw.parse().map_err(|_| ApiError::InvalidAddress)
}

fn required_chain(state: &AppState) -> Result<&ChainClient, ApiError> {
    state.chain.as_ref().ok_or(ApiError::Config("contract address not configured"))
}

fn required_authorizer(state: &AppState) -> Result<&MintAuthorizer, ApiError> {
    state.authorizer.as_ref().ok_or(ApiError::Config("signing key not configured"))
}

async fn evaluate(state: &AppState, address: &str) -> MoodResult {
    pipeline::evaluate_address(&state.sources, &state.catalog, &state.engine, address).await
}

/// Check the signing identity against the live contract authority, failing
/// closed before any signature is produced.
async fn check_authority(state: &AppState) -> Result<(&MintAuthorizer, &ChainClient), ApiError> {
    let authorizer = required_authorizer(state)?;
    let chain = required_chain(state)?;
    let onchain = chain.owner().await?;
    authorizer.verify_authority(onchain)?;
    Ok((authorizer, chain))
}

/// GET /mood?address=0x… — classify a wallet. Never cached: the mood must
/// reflect live chain activity.
pub async fn mood(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AddressQuery>,
) -> Result<Response, ApiError> {
    let raw = query.address.as_deref().unwrap_or_default();
    let address = parse_address(raw)?;

    let result = evaluate(&state, &format!("{address:#x}")).await;

    let mut response = Json(result).into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        "no-store, no-cache, must-revalidate, max-age=0".parse().unwrap(),
    );
    headers.insert(header::PRAGMA, "no-cache".parse().unwrap());
    headers.insert(header::EXPIRES, "0".parse().unwrap());
    Ok(response)
}

/// POST /mint-auth {address} — classify and sign a mint authorization.
pub async fn mint_auth(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AddressBody>,
) -> Result<Response, ApiError> {
    let address = parse_address(&body.address)?;
    let (authorizer, _) = check_authority(&state).await?;

    let result = evaluate(&state, &format!("{address:#x}")).await;
    let signed = authorizer.authorize(address, &result).await?;

    info!(
        "Mint authorization issued: to={address} week={} mood={} rarity={}",
        result.week_index, result.mood_id, result.rarity_id,
    );

    Ok(Json(signed).into_response())
}

/// GET /debug/owner[?address=0x…] — operator diagnostic for the authority
/// check, plus the claim status for an optional wallet. Performs the same
/// live owner read as the signing path.
pub async fn debug_owner(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AddressQuery>,
) -> Result<Response, ApiError> {
    let authorizer = required_authorizer(&state)?;
    let chain = required_chain(&state)?;

    let onchain = chain.owner().await?;
    let signer = authorizer.address();
    let owner_match = signer == onchain;
    let current_week = week_index(Utc::now());

    let has_minted = match &query.address {
        Some(raw) => {
            let address = parse_address(raw)?;
            Some(chain.has_minted_week(address, current_week).await?)
        }
        None => None,
    };

    Ok(Json(json!({
        "signerAddress": signer,
        "contractOwner": onchain,
        "contractAddress": chain.contract_address(),
        "ownerMatch": owner_match,
        "currentWeekIndex": current_week,
        "hasMintedThisWeek": has_minted,
        "status": if owner_match {
            "Signer matches contract owner"
        } else {
            "MISMATCH - rotate the signing key to the contract owner"
        },
    }))
    .into_response())
}

/// POST /debug/simulate-mint {address} — run the whole pipeline, sign, and
/// dry-run the mint on-chain. Operator tool for diagnosing verification
/// failures before a user pays gas for them.
pub async fn simulate_mint(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AddressBody>,
) -> Result<Response, ApiError> {
    let address = parse_address(&body.address)?;
    let (authorizer, chain) = check_authority(&state).await?;

    let result = evaluate(&state, &format!("{address:#x}")).await;
    let (signature, _) = authorizer.sign(address, &result).await?;

    let has_minted = chain.has_minted_week(address, result.week_index).await?;

    let sig_bytes = Bytes::from(
        alloy::hex::decode(&signature).map_err(|e| {
            ApiError::Signing(crate::signer::SignerError::Signing(e.to_string()))
        })?,
    );
    let (simulation, raw_error) = match chain.simulate_mint(address, &result, sig_bytes).await {
        Ok(()) => ("Transaction would succeed".to_string(), None),
        Err(e) => {
            let raw = e.to_string();
            (friendly_revert(&raw).to_string(), Some(raw))
        }
    };

    Ok(Json(json!({
        "address": address,
        "weekIndex": result.week_index,
        "moodId": result.mood_id,
        "stats": result.stats,
        "rarityId": result.rarity_id,
        "hasMintedThisWeek": has_minted,
        "signerAddress": authorizer.address(),
        "simulation": simulation,
        "rawError": raw_error,
    }))
    .into_response())
}
