//! Subcommands.
//!
//! Every group is an enum of subcommands with an async `run` taking the shared [`Context`].

use alloy_primitives::Address;
use clap::Parser;
use eyre::{Result, eyre};
use nftm_cli::utils;
use nftm_config::Config;
use nftm_gateway::{GatewayClient, Pagination};
use nftm_wallets::WalletSession;
use serde::Serialize;

pub mod activity;
pub mod collection;
pub mod item;
pub mod market;
pub mod order;
pub mod wallet;

/// State shared by all commands of one invocation.
pub struct Context {
    pub config: Config,
    /// Print raw JSON instead of tables.
    pub json: bool,
    pub session: WalletSession,
    /// Sends the session account with every request.
    pub gateway: GatewayClient,
}

impl Context {
    pub fn new(config: Config, json: bool) -> Result<Self> {
        let session = utils::get_wallet_session(&config)?;
        let gateway = utils::get_gateway(&config, session.clone())?;
        Ok(Self { config, json, session, gateway })
    }

    pub fn pagination(&self, args: &PageArgs) -> Pagination {
        Pagination::new(args.page, args.page_size.unwrap_or(self.config.page_size))
    }

    /// Prints `value` as JSON with `--json`, or as rendered by `human` otherwise.
    pub fn print<T: Serialize + ?Sized>(
        &self,
        value: &T,
        human: impl FnOnce(&T) -> String,
    ) -> Result<()> {
        if self.json {
            utils::print_json(value)
        } else {
            println!("{}", human(value));
            Ok(())
        }
    }

    /// `address`, or the session account when none is given.
    pub fn account_or(&self, address: Option<Address>) -> Result<Address> {
        address.or_else(|| self.session.account()).ok_or_else(|| {
            eyre!("no address given and no wallet connected; run `nftm wallet connect` first")
        })
    }

    /// Fails unless an account is connected, for requests the service attributes to a user.
    pub fn require_account(&self) -> Result<Address> {
        self.session.account().ok_or_else(|| {
            eyre!("this command needs a connected wallet; run `nftm wallet connect` first")
        })
    }
}

/// Paging of list commands.
#[derive(Clone, Debug, Default, Parser)]
pub struct PageArgs {
    /// The page to fetch, starting at 1.
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Records per page. Defaults to the configured `page_size`.
    #[arg(long, value_name = "SIZE")]
    pub page_size: Option<u32>,
}
