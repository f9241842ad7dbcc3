use alloy_primitives::ChainId;
use nftm_common::errors::FsPathError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// EIP-1193 error code: the user rejected the request.
pub const USER_REJECTED_REQUEST: i64 = 4001;
/// EIP-1193 error code: the requested method and/or account has not been authorized by the user.
pub const UNAUTHORIZED: i64 = 4100;
/// EIP-1193 error code: the provider does not support the requested method.
pub const UNSUPPORTED_METHOD: i64 = 4200;
/// EIP-1193 error code: the provider is disconnected from all chains.
pub const DISCONNECTED: i64 = 4900;
/// Error code wallets use for `wallet_switchEthereumChain` on a chain they don't know.
pub const UNRECOGNIZED_CHAIN: i64 = 4902;

/// An error object returned by the wallet capability, as defined by EIP-1193 and JSON-RPC.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{message} (code {code})")]
pub struct ProviderRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ProviderRpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), data: None }
    }

    pub fn user_rejected() -> Self {
        Self::new(USER_REJECTED_REQUEST, "User rejected the request.")
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == USER_REJECTED_REQUEST
    }

    pub fn is_unrecognized_chain(&self) -> bool {
        self.code == UNRECOGNIZED_CHAIN
    }
}

/// Errors raised while talking to the wallet capability.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error(transparent)]
    Rpc(#[from] ProviderRpcError),
    #[error("failed to reach the wallet: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("unexpected response to `{method}`: {reason}")]
    InvalidResponse { method: String, reason: String },
}

impl ProviderError {
    pub fn invalid_response(method: &str, reason: impl ToString) -> Self {
        Self::InvalidResponse { method: method.to_string(), reason: reason.to_string() }
    }

    /// Returns the wallet's error object, if the wallet answered with one.
    pub fn as_rpc_error(&self) -> Option<&ProviderRpcError> {
        match self {
            Self::Rpc(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_user_rejection(&self) -> bool {
        self.as_rpc_error().is_some_and(ProviderRpcError::is_user_rejection)
    }
}

/// Errors surfaced by the wallet session holder.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("no wallet is available; install a wallet or point `rpc_url` at one")]
    NoWalletCapability,
    #[error("the request was rejected in the wallet")]
    UserRejected,
    #[error("chain {0} is not known to the wallet; add the network to the wallet first")]
    UnknownNetwork(ChainId),
    #[error("failed to switch the wallet to chain {chain_id}")]
    SwitchFailed {
        chain_id: ChainId,
        #[source]
        source: ProviderError,
    },
    #[error("no wallet account is connected")]
    NotConnected,
    #[error("the wallet did not return any account")]
    NoAccounts,
    #[error(transparent)]
    Provider(ProviderError),
    #[error(transparent)]
    Store(#[from] FsPathError),
}

impl From<ProviderError> for WalletError {
    fn from(err: ProviderError) -> Self {
        if err.is_user_rejection() { Self::UserRejected } else { Self::Provider(err) }
    }
}
