//! The wallet capability: an EIP-1193 style provider.
//!
//! A provider answers `request(method, params)` calls and pushes [`ProviderEvent`]s when the
//! user switches accounts or chains in the wallet.

use crate::{error::ProviderError, types::TransactionRequest};
use alloy_primitives::{Address, B256, Bytes, ChainId, U64, U256, hex};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::fmt;
use tokio::sync::broadcast;

mod http;
pub use http::HttpWalletProvider;

#[cfg(test)]
pub(crate) mod mock;

/// Number of undelivered notifications a slow subscriber may fall behind by.
pub(crate) const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Notifications pushed by the wallet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProviderEvent {
    /// `accountsChanged`: the accounts the application may use, the selected one first.
    AccountsChanged(Vec<Address>),
    /// `chainChanged`: the wallet now targets this chain.
    ChainChanged(ChainId),
}

/// An EIP-1193 wallet provider.
#[async_trait]
pub trait WalletProvider: fmt::Debug + Send + Sync {
    /// Sends a raw request to the wallet.
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError>;

    /// Registers a listener for wallet notifications.
    ///
    /// Dropping the receiver removes the listener.
    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent>;
}

/// Typed wrappers around the wallet methods nftm uses.
#[async_trait]
pub trait WalletProviderExt: WalletProvider {
    /// Sends a request and decodes the result.
    async fn request_as<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, ProviderError> {
        let value = self.request(method, params).await?;
        serde_json::from_value(value).map_err(|err| ProviderError::invalid_response(method, err))
    }

    /// `eth_requestAccounts`: asks the user to authorize accounts. May prompt.
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.request_as("eth_requestAccounts", json!([])).await
    }

    /// `eth_accounts`: the already authorized accounts. Never prompts.
    async fn accounts(&self) -> Result<Vec<Address>, ProviderError> {
        self.request_as("eth_accounts", json!([])).await
    }

    /// `eth_chainId`
    async fn chain_id(&self) -> Result<ChainId, ProviderError> {
        let chain_id: U64 = self.request_as("eth_chainId", json!([])).await?;
        Ok(chain_id.to())
    }

    /// `wallet_switchEthereumChain`
    async fn switch_chain(&self, chain_id: ChainId) -> Result<(), ProviderError> {
        self.request("wallet_switchEthereumChain", json!([{ "chainId": U64::from(chain_id) }]))
            .await
            .map(drop)
    }

    /// `eth_getBalance` at the latest block.
    async fn balance(&self, account: Address) -> Result<U256, ProviderError> {
        self.request_as("eth_getBalance", json!([account, "latest"])).await
    }

    /// `eth_call` at the latest block.
    async fn call(&self, tx: &TransactionRequest) -> Result<Bytes, ProviderError> {
        self.request_as("eth_call", json!([tx, "latest"])).await
    }

    /// `eth_sendTransaction`: the wallet signs and submits in one step.
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<B256, ProviderError> {
        self.request_as("eth_sendTransaction", json!([tx])).await
    }

    /// `personal_sign`
    async fn personal_sign(
        &self,
        message: &[u8],
        account: Address,
    ) -> Result<Bytes, ProviderError> {
        self.request_as("personal_sign", json!([hex::encode_prefixed(message), account])).await
    }
}

impl<P: WalletProvider + ?Sized> WalletProviderExt for P {}
