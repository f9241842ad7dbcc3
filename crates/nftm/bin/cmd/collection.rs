use super::{Context, PageArgs, item::acknowledged};
use crate::fmt;
use alloy_primitives::Address;
use clap::{Parser, Subcommand};
use eyre::{Result, bail};
use nftm_gateway::{CreateCollectionRequest, UpdateCollectionRequest};

/// CLI arguments for `nftm collection`.
#[derive(Clone, Debug, Subcommand)]
pub enum CollectionSubcommands {
    /// List collections.
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Show a collection by its marketplace id.
    Get { id: u64 },

    /// Show the collection deployed at an address.
    Address { address: Address },

    /// Register a collection.
    Create {
        /// The collection contract.
        address: Address,

        #[arg(long)]
        name: String,

        #[arg(long)]
        symbol: String,

        /// Defaults to the session account.
        #[arg(long)]
        creator: Option<Address>,

        #[command(flatten)]
        details: DetailArgs,
    },

    /// Update the given fields of a collection.
    Update {
        id: u64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        symbol: Option<String>,

        #[command(flatten)]
        details: DetailArgs,

        #[arg(long)]
        floor_price: Option<f64>,
    },
}

/// Descriptive fields of a collection.
#[derive(Clone, Debug, Default, Parser)]
pub struct DetailArgs {
    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub website: Option<String>,

    #[arg(long, value_name = "URI")]
    pub image_uri: Option<String>,
}

impl CollectionSubcommands {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        let gateway = &ctx.gateway;
        match self {
            Self::List { page } => {
                ctx.print(&gateway.collections(ctx.pagination(&page)).await?, fmt::page)
            }
            Self::Get { id } => ctx.print(&gateway.collection(id).await?, fmt::record),
            Self::Address { address } => {
                ctx.print(&gateway.collection_by_address(address).await?, fmt::record)
            }
            Self::Create { address, name, symbol, creator, details } => {
                let DetailArgs { description, website, image_uri } = details;
                let request = CreateCollectionRequest {
                    symbol,
                    name,
                    creator: ctx.account_or(creator)?,
                    address,
                    description,
                    website,
                    image_uri,
                };
                ctx.print(&gateway.create_collection(&request).await?, fmt::record)
            }
            Self::Update { id, name, symbol, details, floor_price } => {
                let DetailArgs { description, website, image_uri } = details;
                let update = UpdateCollectionRequest {
                    name,
                    symbol,
                    description,
                    website,
                    image_uri,
                    floor_price,
                    ..Default::default()
                };
                if update.is_empty() {
                    bail!("nothing to update; pass at least one field");
                }
                let ack = gateway.update_collection(id, &update).await?;
                ctx.print(&ack, |ack| acknowledged(ack, "collection updated"))
            }
        }
    }
}
