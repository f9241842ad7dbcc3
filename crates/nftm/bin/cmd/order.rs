use super::{Context, PageArgs};
use crate::fmt;
use alloy_primitives::Address;
use clap::Subcommand;
use eyre::{Result, WrapErr};
use nftm_gateway::{CreateOrderRequest, OrderStatus, OrderType};

/// CLI arguments for `nftm order`.
#[derive(Clone, Debug, Subcommand)]
pub enum OrderSubcommands {
    /// List orders, newest first.
    #[command(visible_alias = "ls")]
    List {
        /// Only orders of this kind, by name or code, e.g. `listing` or `2`.
        #[arg(long = "type", value_name = "TYPE")]
        order_type: Option<OrderType>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Show an order.
    Get { id: u64 },

    /// List the orders of a user.
    User {
        /// The maker. Defaults to the session account.
        address: Option<Address>,

        /// Only orders in this state, e.g. `active`.
        #[arg(long)]
        status: Option<OrderStatus>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// List the orders on an item.
    Item {
        collection: Address,
        token_id: String,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Create an order made by the session account.
    Create {
        collection: Address,
        token_id: String,

        /// The price in the order's currency.
        #[arg(long)]
        price: f64,

        #[arg(long = "type", value_name = "TYPE", default_value = "listing")]
        order_type: OrderType,

        /// Expiry as a unix timestamp in seconds.
        #[arg(long, value_name = "TIMESTAMP")]
        expire: Option<i64>,
    },

    /// Cancel an order made by the session account.
    Cancel { id: u64 },

    /// Refresh an order from its on-chain state.
    Sync { id: u64 },
}

impl OrderSubcommands {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        let gateway = &ctx.gateway;
        match self {
            Self::List { order_type, page } => {
                let orders = gateway.orders(ctx.pagination(&page), order_type).await?;
                ctx.print(&orders, fmt::page)
            }
            Self::Get { id } => ctx.print(&gateway.order(id).await?, fmt::record),
            Self::User { address, status, page } => {
                let user = ctx.account_or(address)?;
                let orders = gateway.user_orders(user, ctx.pagination(&page), status).await?;
                ctx.print(&orders, fmt::page)
            }
            Self::Item { collection, token_id, page } => {
                let orders =
                    gateway.item_orders(collection, &token_id, ctx.pagination(&page)).await?;
                ctx.print(&orders, fmt::page)
            }
            Self::Create { collection, token_id, price, order_type, expire } => {
                ctx.require_account()?;
                let mut request =
                    CreateOrderRequest::new(order_type, price).token(collection, token_id);
                if let Some(expire) = expire {
                    request = request.expire_time(expire);
                }
                let order =
                    gateway.create_order(&request).await.wrap_err("failed to create order")?;
                ctx.print(&order, fmt::record)
            }
            Self::Cancel { id } => {
                ctx.require_account()?;
                let ack = gateway.cancel_order(id).await?;
                ctx.print(&ack, |ack| {
                    ack.message.clone().unwrap_or_else(|| format!("order {id} cancelled"))
                })
            }
            Self::Sync { id } => ctx.print(&gateway.sync_order(id).await?, fmt::record),
        }
    }
}
