use super::{Context, PageArgs};
use crate::fmt;
use alloy_primitives::Address;
use clap::Subcommand;
use eyre::{Result, bail};
use nftm_gateway::{Ack, CreateItemRequest, PriceUpdate};

/// CLI arguments for `nftm item`.
#[derive(Clone, Debug, Subcommand)]
pub enum ItemSubcommands {
    /// List items.
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Show an item by its marketplace id.
    Get { id: u64 },

    /// Show an item by collection and token id.
    Token { collection: Address, token_id: String },

    /// List the items owned by an account.
    Owner {
        /// Defaults to the session account.
        address: Option<Address>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// List the items of a collection.
    Collection {
        collection: Address,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Search items by name.
    Search {
        keyword: String,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Create an item, or update the one with the same collection and token id.
    Upsert {
        collection: Address,
        token_id: String,

        #[arg(long)]
        name: String,

        /// Defaults to the session account.
        #[arg(long)]
        creator: Option<Address>,

        #[arg(long)]
        owner: Option<Address>,

        #[arg(long, default_value_t = 1)]
        supply: i64,
    },

    /// Record a new owner of an item.
    SetOwner { collection: Address, token_id: String, owner: Address },

    /// Update the listing or sale price of an item.
    SetPrice {
        collection: Address,
        token_id: String,

        #[arg(long)]
        list: Option<f64>,

        #[arg(long)]
        sale: Option<f64>,
    },
}

impl ItemSubcommands {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        let gateway = &ctx.gateway;
        match self {
            Self::List { page } => {
                ctx.print(&gateway.items(ctx.pagination(&page)).await?, fmt::page)
            }
            Self::Get { id } => ctx.print(&gateway.item(id).await?, fmt::record),
            Self::Token { collection, token_id } => {
                ctx.print(&gateway.item_by_token(collection, &token_id).await?, fmt::record)
            }
            Self::Owner { address, page } => {
                let owner = ctx.account_or(address)?;
                ctx.print(&gateway.owner_items(owner, ctx.pagination(&page)).await?, fmt::page)
            }
            Self::Collection { collection, page } => {
                let items = gateway.collection_items(collection, ctx.pagination(&page)).await?;
                ctx.print(&items, fmt::page)
            }
            Self::Search { keyword, page } => {
                let items = gateway.search_items(&keyword, ctx.pagination(&page)).await?;
                ctx.print(&items, fmt::page)
            }
            Self::Upsert { collection, token_id, name, creator, owner, supply } => {
                let request = CreateItemRequest {
                    token_id,
                    name,
                    owner,
                    collection_address: Some(collection),
                    creator: ctx.account_or(creator)?,
                    supply,
                };
                ctx.print(&gateway.upsert_item(&request).await?, fmt::record)
            }
            Self::SetOwner { collection, token_id, owner } => {
                let ack = gateway.set_item_owner(collection, &token_id, owner).await?;
                ctx.print(&ack, |ack| acknowledged(ack, "owner updated"))
            }
            Self::SetPrice { collection, token_id, list, sale } => {
                if list.is_none() && sale.is_none() {
                    bail!("nothing to update; pass --list and/or --sale");
                }
                let update = PriceUpdate { list_price: list, sale_price: sale };
                let ack = gateway.set_item_price(collection, &token_id, &update).await?;
                ctx.print(&ack, |ack| acknowledged(ack, "price updated"))
            }
        }
    }
}

pub(crate) fn acknowledged(ack: &Ack, default: &str) -> String {
    ack.message.clone().unwrap_or_else(|| default.to_string())
}
