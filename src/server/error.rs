use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::chain::ChainError;
use crate::signer::SignerError;

/// HTTP-facing error taxonomy. Upstream-source failures never appear here;
/// they degrade to an empty activity vector before reaching a handler.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed wallet address in the request.
    InvalidAddress,
    /// Missing signing key or contract address. The reason stays in logs.
    Config(&'static str),
    /// Signer key does not match the live on-chain authority.
    AuthorityMismatch(SignerError),
    /// RPC read failed; the underlying message is surfaced.
    Chain(ChainError),
    Signing(SignerError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidAddress => (StatusCode::BAD_REQUEST, "Invalid address".to_string()),
            ApiError::Config(reason) => {
                tracing::error!("Configuration error: {reason}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server configuration error".to_string())
            }
            ApiError::AuthorityMismatch(e) => {
                // Operator diagnostic; the minting user only sees a generic
                // failure because there is nothing they can do about it.
                tracing::error!("Authority check failed: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server configuration error".to_string())
            }
            ApiError::Chain(e) => {
                tracing::error!("Chain read failed: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            ApiError::Signing(e) => {
                tracing::error!("Signing failed: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate mint authorization".to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ChainError> for ApiError {
    fn from(e: ChainError) -> Self {
        ApiError::Chain(e)
    }
}

impl From<SignerError> for ApiError {
    fn from(e: SignerError) -> Self {
        match e {
            SignerError::AuthorityMismatch { .. } => ApiError::AuthorityMismatch(e),
            other => ApiError::Signing(other),
        }
    }
}

/// Reduce a raw revert/error message to a user-presentable category by
/// substring matching. Best effort, not exhaustive; unmatched errors fall
/// back to a generic message.
pub fn friendly_revert(raw: &str) -> &'static str {
    if raw.contains("Already minted this week") {
        "You already minted your badge this week"
    } else if raw.contains("Invalid signature") {
        "Mint authorization was rejected - contact support"
    } else if raw.contains("Caller must be recipient") {
        "The minting wallet must be the badge recipient"
    } else if raw.contains("rejected") || raw.contains("denied") || raw.contains("cancelled") {
        "Transaction cancelled"
    } else {
        "Mint failed - please try again"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_reverts_map_to_categories() {
        assert_eq!(
            friendly_revert("execution reverted: Already minted this week"),
            "You already minted your badge this week"
        );
        assert_eq!(
            friendly_revert("execution reverted: Invalid signature"),
            "Mint authorization was rejected - contact support"
        );
        assert_eq!(
            friendly_revert("execution reverted: Caller must be recipient"),
            "The minting wallet must be the badge recipient"
        );
        assert_eq!(friendly_revert("User rejected the request"), "Transaction cancelled");
    }

    #[test]
    fn invalid_address_is_400() {
        let response = ApiError::InvalidAddress.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn authority_mismatch_is_500_config_error() {
        let mismatch = SignerError::AuthorityMismatch {
            signer: "0x1111111111111111111111111111111111111111".parse().unwrap(),
            onchain: "0x2222222222222222222222222222222222222222".parse().unwrap(),
        };
        let response = ApiError::from(mismatch).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn config_error_is_500() {
        let response = ApiError::Config("signing key not configured").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unknown_errors_fall_back_to_generic() {
        assert_eq!(friendly_revert("gas required exceeds allowance"), "Mint failed - please try again");
    }
}
