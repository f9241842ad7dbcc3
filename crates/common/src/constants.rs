//! Commonly used constants.

use alloy_primitives::{Address, ChainId, address};
use std::time::Duration;

/// The default base URL of the marketplace REST service.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";

/// The default endpoint of the wallet capability (a local dev node or wallet bridge).
pub const DEFAULT_WALLET_RPC_URL: &str = "http://localhost:8545";

/// The timeout applied to every marketplace service request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// How often the wallet capability is polled for account and chain changes.
pub const WALLET_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Header carrying the acting account on every marketplace request.
pub const USER_ADDRESS_HEADER: &str = "X-User-Address";

/// Default number of records per page requested from the service.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size the service accepts; anything above falls back to [`DEFAULT_PAGE_SIZE`].
pub const MAX_PAGE_SIZE: u32 = 100;

/// Chain id of a local hardhat/anvil dev node.
pub const DEV_CHAIN_ID: ChainId = 31337;

/// The well-known dev node accounts.
///
/// The first one is the account used by test-mode sessions.
pub const DEV_ACCOUNTS: [Address; 3] = [
    address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
    address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8"),
    address!("0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC"),
];

/// Account used by test-mode sessions.
pub const TEST_ACCOUNT: Address = DEV_ACCOUNTS[0];
