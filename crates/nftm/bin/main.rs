//! `nftm`: browse and trade on the NFT marketplace from the command line.

#[macro_use]
extern crate tracing;

use clap::Parser;
use eyre::Result;
use nftm_cli::{
    handler,
    utils::{self, LoadConfig},
};
use nftm_config::Config;

pub mod args;
pub mod cmd;
mod fmt;

use args::{Nftm, NftmSubcommand};
use cmd::Context;

fn main() -> Result<()> {
    handler::install();
    utils::load_dotenv();
    let args = Nftm::parse();
    let config = args.global.load_config()?;
    utils::subscriber(config.default_log_level());
    main_args(args, config)
}

#[tokio::main]
async fn main_args(args: Nftm, config: Config) -> Result<()> {
    debug!(
        api_url = %config.api_url,
        rpc_url = %config.rpc_url,
        environment = %config.environment,
        "loaded config"
    );
    let ctx = Context::new(config, args.global.json)?;
    match args.cmd {
        NftmSubcommand::Wallet { command } => command.run(&ctx).await,
        NftmSubcommand::Order { command } => command.run(&ctx).await,
        NftmSubcommand::Item { command } => command.run(&ctx).await,
        NftmSubcommand::Collection { command } => command.run(&ctx).await,
        NftmSubcommand::Activity { command } => command.run(&ctx).await,
        NftmSubcommand::Market { command } => command.run(&ctx).await,
        NftmSubcommand::Health => cmd::market::health(&ctx).await,
    }
}
