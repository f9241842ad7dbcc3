use crate::{
    error::WalletError,
    provider::{WalletProvider, WalletProviderExt},
    types::TransactionRequest,
};
use alloy_primitives::{Address, B256, Bytes, ChainId, U64, U256};
use std::{fmt, sync::Arc};

/// Signs through the connected wallet on behalf of the session account.
///
/// Wallets never hand out keys: messages are signed with `personal_sign` and transactions are
/// signed and submitted in one step with `eth_sendTransaction`.
#[derive(Clone)]
pub struct WalletSigner {
    provider: Arc<dyn WalletProvider>,
    address: Address,
    chain_id: Option<ChainId>,
}

impl fmt::Debug for WalletSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletSigner")
            .field("address", &self.address)
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}

impl WalletSigner {
    pub(crate) fn new(
        provider: Arc<dyn WalletProvider>,
        address: Address,
        chain_id: Option<ChainId>,
    ) -> Self {
        Self { provider, address, chain_id }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn chain_id(&self) -> Option<ChainId> {
        self.chain_id
    }

    /// Signs `message` with the EIP-191 personal message prefix.
    pub async fn sign_message(&self, message: &[u8]) -> Result<Bytes, WalletError> {
        Ok(self.provider.personal_sign(message, self.address).await?)
    }

    /// Signs and submits `tx` from the session account, returning the transaction hash.
    ///
    /// `from` is always the session account; `chainId` defaults to the session chain.
    pub async fn send_transaction(&self, mut tx: TransactionRequest) -> Result<B256, WalletError> {
        tx.from = Some(self.address);
        if tx.chain_id.is_none() {
            tx.chain_id = self.chain_id.map(U64::from);
        }
        let hash = self.provider.send_transaction(&tx).await?;
        info!(target: "wallets::signer", from = %self.address, %hash, "transaction submitted");
        Ok(hash)
    }

    /// Executes `tx` as a read-only call from the session account.
    pub async fn call(&self, mut tx: TransactionRequest) -> Result<Bytes, WalletError> {
        tx.from = Some(self.address);
        Ok(self.provider.call(&tx).await?)
    }

    /// The session account's balance in wei.
    pub async fn balance(&self) -> Result<U256, WalletError> {
        Ok(self.provider.balance(self.address).await?)
    }
}
