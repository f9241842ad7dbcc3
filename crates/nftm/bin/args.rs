use crate::cmd::{
    activity::ActivitySubcommands, collection::CollectionSubcommands, item::ItemSubcommands,
    market::MarketSubcommands, order::OrderSubcommands, wallet::WalletSubcommands,
};
use clap::{Parser, Subcommand};
use nftm_cli::opts::GlobalOpts;

const VERSION_MESSAGE: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CARGO_PKG_NAME"), ")");

/// Browse and trade on the NFT marketplace.
#[derive(Parser)]
#[command(
    name = "nftm",
    version = VERSION_MESSAGE,
    after_help = "Find more information in the README: https://github.com/nft-market/nftm",
    next_display_order = None,
)]
pub struct Nftm {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub cmd: NftmSubcommand,
}

#[derive(Subcommand)]
pub enum NftmSubcommand {
    /// Connect, inspect and watch the wallet session.
    #[command(visible_alias = "w")]
    Wallet {
        #[command(subcommand)]
        command: WalletSubcommands,
    },

    /// Listings and bids.
    #[command(visible_alias = "o")]
    Order {
        #[command(subcommand)]
        command: OrderSubcommands,
    },

    /// Individual tokens.
    #[command(visible_alias = "i")]
    Item {
        #[command(subcommand)]
        command: ItemSubcommands,
    },

    /// NFT collections.
    #[command(visible_alias = "c")]
    Collection {
        #[command(subcommand)]
        command: CollectionSubcommands,
    },

    /// Sales, transfers and other marketplace events.
    #[command(visible_alias = "a")]
    Activity {
        #[command(subcommand)]
        command: ActivitySubcommands,
    },

    /// Market-wide data.
    Market {
        #[command(subcommand)]
        command: MarketSubcommands,
    },

    /// Check that the marketplace service is up.
    Health,
}
