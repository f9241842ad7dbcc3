use super::{Context, PageArgs};
use crate::fmt;
use alloy_primitives::{Address, B256};
use clap::Subcommand;
use eyre::Result;
use nftm_gateway::{ActivityType, CreateActivityRequest};

/// CLI arguments for `nftm activity`.
#[derive(Clone, Debug, Subcommand)]
pub enum ActivitySubcommands {
    /// List marketplace events.
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Show an event.
    Get { id: u64 },

    /// List the events an account took part in.
    User {
        /// Defaults to the session account.
        address: Option<Address>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// List the history of an item.
    Item {
        collection: Address,
        token_id: String,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Record an event.
    Create {
        /// The kind of event, by name or code, e.g. `sell` or `7`.
        #[arg(value_name = "TYPE")]
        activity_type: ActivityType,

        #[arg(long)]
        collection: Option<Address>,

        #[arg(long)]
        token_id: Option<String>,

        #[arg(long, default_value_t = 0.0)]
        price: f64,

        /// Defaults to the session account.
        #[arg(long)]
        maker: Option<Address>,

        #[arg(long)]
        taker: Option<Address>,

        #[arg(long, default_value_t = 0)]
        block: i64,

        #[arg(long)]
        tx_hash: Option<B256>,

        /// Unix timestamp of the event in seconds.
        #[arg(long, value_name = "TIMESTAMP")]
        time: Option<i64>,
    },
}

impl ActivitySubcommands {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        let gateway = &ctx.gateway;
        match self {
            Self::List { page } => {
                ctx.print(&gateway.activities(ctx.pagination(&page)).await?, fmt::page)
            }
            Self::Get { id } => ctx.print(&gateway.activity(id).await?, fmt::record),
            Self::User { address, page } => {
                let user = ctx.account_or(address)?;
                let activities = gateway.user_activities(user, ctx.pagination(&page)).await?;
                ctx.print(&activities, fmt::page)
            }
            Self::Item { collection, token_id, page } => {
                let activities =
                    gateway.item_activities(collection, &token_id, ctx.pagination(&page)).await?;
                ctx.print(&activities, fmt::page)
            }
            Self::Create {
                activity_type,
                collection,
                token_id,
                price,
                maker,
                taker,
                block,
                tx_hash,
                time,
            } => {
                let request = CreateActivityRequest {
                    activity_type,
                    maker: maker.or_else(|| ctx.session.account()),
                    taker,
                    collection_address: collection,
                    token_id,
                    price,
                    block_number: block,
                    tx_hash,
                    event_time: time,
                };
                ctx.print(&gateway.create_activity(&request).await?, fmt::record)
            }
        }
    }
}
