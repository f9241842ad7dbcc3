use super::Context;
use crate::fmt;
use alloy_primitives::{ChainId, hex, utils::format_ether};
use clap::Subcommand;
use eyre::Result;
use serde::Serialize;
use tokio::sync::broadcast::error::RecvError;

/// CLI arguments for `nftm wallet`.
#[derive(Clone, Debug, Subcommand)]
pub enum WalletSubcommands {
    /// Ask the wallet for an account and make it the active session.
    #[command(visible_alias = "c")]
    Connect {
        /// Use the fixed development account instead of a wallet.
        #[arg(long)]
        test: bool,
    },

    /// Forget the active session.
    Disconnect,

    /// Show the active session.
    #[command(visible_alias = "s")]
    Status {
        /// Ask the wallet whether the session account is still authorized.
        #[arg(long)]
        refresh: bool,
    },

    /// Ask the wallet to switch to another chain.
    Switch {
        /// The chain id, e.g. 1 or 137.
        chain_id: ChainId,
    },

    /// Follow account and chain changes in the wallet until interrupted.
    Watch,

    /// Show the balance of the session account.
    Balance,

    /// Sign a message with the session account.
    Sign {
        /// The message to sign.
        message: String,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Balance {
    account: String,
    wei: String,
    ether: String,
}

impl WalletSubcommands {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        let session = &ctx.session;
        match self {
            Self::Connect { test } => {
                let connected =
                    if test { session.connect_test_account() } else { session.connect().await? };
                ctx.print(&connected, fmt::session)?;
            }
            Self::Disconnect => {
                session.disconnect();
                ctx.print(&session.session(), fmt::session)?;
            }
            Self::Status { refresh } => {
                if refresh && session.has_wallet() {
                    session.restore().await;
                }
                ctx.print(&session.session(), fmt::session)?;
            }
            Self::Switch { chain_id } => {
                session.switch_network(chain_id).await?;
                ctx.print(&session.session(), fmt::session)?;
            }
            Self::Watch => watch(ctx).await?,
            Self::Balance => {
                let signer = session.signer()?;
                let wei = signer.balance().await?;
                let balance = Balance {
                    account: signer.address().to_string(),
                    wei: wei.to_string(),
                    ether: format_ether(wei),
                };
                ctx.print(&balance, |b| format!("{} ETH", b.ether))?;
            }
            Self::Sign { message } => {
                let signature = session.signer()?.sign_message(message.as_bytes()).await?;
                ctx.print(&signature, |signature| hex::encode_prefixed(signature))?;
            }
        }
        Ok(())
    }
}

async fn watch(ctx: &Context) -> Result<()> {
    let _subscription = ctx.session.listen()?;
    let mut events = ctx.session.events();
    info!(rpc_url = %ctx.config.rpc_url, "watching wallet");
    if !ctx.json {
        println!("{}", fmt::session(&ctx.session.session()));
    }
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = events.recv() => match event {
                Ok(event) => {
                    if ctx.json {
                        nftm_cli::utils::print_json(&ctx.session.session())?;
                    } else {
                        println!("{}", fmt::event(&event));
                    }
                }
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "missed session events"),
                Err(RecvError::Closed) => break,
            },
        }
    }
    Ok(())
}
