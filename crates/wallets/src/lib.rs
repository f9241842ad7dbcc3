//! # nftm-wallets
//!
//! Tracks which account is acting in the marketplace.
//!
//! [`WalletSession`] holds the session, an account either authorized by an external wallet or the
//! fixed development account of test mode. The wallet is reached through the [`WalletProvider`]
//! capability, an EIP-1193 style request/notification interface; [`HttpWalletProvider`] talks to
//! a JSON-RPC wallet endpoint.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod error;
pub use error::{ProviderError, ProviderRpcError, WalletError};

mod holder;
pub use holder::{Subscription, WalletSession};

pub mod provider;
pub use provider::{HttpWalletProvider, ProviderEvent, WalletProvider, WalletProviderExt};

mod session;
pub use session::{Session, SessionEvent, SessionState};

mod signer;
pub use signer::WalletSigner;

pub mod store;
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

mod types;
pub use types::TransactionRequest;
