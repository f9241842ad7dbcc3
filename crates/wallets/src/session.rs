use alloy_primitives::{Address, ChainId};
use nftm_common::{DEV_CHAIN_ID, TEST_ACCOUNT};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The record of which account is currently acting.
///
/// An empty session never carries a chain id and is never in test mode; the constructors are the
/// only way to build one, so that holds for every value of this type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SessionRecord", rename_all = "camelCase")]
pub struct Session {
    account: Option<Address>,
    chain_id: Option<ChainId>,
    is_test_mode: bool,
}

impl Session {
    /// A session backed by a wallet account.
    pub const fn connected(account: Address, chain_id: Option<ChainId>) -> Self {
        Self { account: Some(account), chain_id, is_test_mode: false }
    }

    /// The fixed development session, see [`TEST_ACCOUNT`] and [`DEV_CHAIN_ID`].
    pub const fn test() -> Self {
        Self { account: Some(TEST_ACCOUNT), chain_id: Some(DEV_CHAIN_ID), is_test_mode: true }
    }

    pub const fn account(&self) -> Option<Address> {
        self.account
    }

    pub const fn chain_id(&self) -> Option<ChainId> {
        self.chain_id
    }

    pub const fn is_test_mode(&self) -> bool {
        self.is_test_mode
    }

    pub const fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    pub const fn state(&self) -> SessionState {
        match (self.account, self.is_test_mode) {
            (None, _) => SessionState::Disconnected,
            (Some(_), false) => SessionState::Connected,
            (Some(_), true) => SessionState::TestConnected,
        }
    }

    /// Returns a copy with the chain id replaced. An empty session stays empty.
    pub(crate) const fn with_chain_id(self, chain_id: ChainId) -> Self {
        if self.account.is_none() {
            return self;
        }
        Self { chain_id: Some(chain_id), ..self }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(account) = self.account else { return f.write_str("disconnected") };
        write!(f, "{account}")?;
        if let Some(chain_id) = self.chain_id {
            write!(f, " on chain {chain_id}")?;
        }
        if self.is_test_mode {
            f.write_str(" (test mode)")?;
        }
        Ok(())
    }
}

/// Unchecked wire shape of a [`Session`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecord {
    #[serde(default)]
    account: Option<Address>,
    #[serde(default)]
    chain_id: Option<ChainId>,
    #[serde(default)]
    is_test_mode: bool,
}

impl From<SessionRecord> for Session {
    fn from(record: SessionRecord) -> Self {
        match record.account {
            None => Self::default(),
            Some(account) => Self {
                account: Some(account),
                chain_id: record.chain_id,
                is_test_mode: record.is_test_mode,
            },
        }
    }
}

/// The states of the session lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    Disconnected,
    Connected,
    TestConnected,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Disconnected => "disconnected",
            Self::Connected => "connected",
            Self::TestConnected => "connected (test mode)",
        })
    }
}

/// Notifications published by the session holder whenever the session changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// A session was established or replaced.
    Connected(Session),
    /// The wallet switched to another account.
    AccountChanged { previous: Address, current: Address },
    /// The wallet switched to another chain.
    ///
    /// Everything derived from the previous chain is stale; consumers reload their state.
    ChainChanged { chain_id: ChainId },
    /// The session was cleared.
    Disconnected,
}

impl SessionEvent {
    /// Whether consumers must rebuild their derived state.
    pub const fn requires_reload(&self) -> bool {
        matches!(self, Self::ChainChanged { .. })
    }
}
