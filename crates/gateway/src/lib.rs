//! # nftm-gateway
//!
//! Typed client of the marketplace HTTP API.
//!
//! ```no_run
//! use nftm_gateway::{GatewayClient, Pagination};
//!
//! # async fn run() -> Result<(), nftm_gateway::GatewayError> {
//! let client = GatewayClient::new("http://localhost:8080/api/v1")?;
//! let listings = client.orders(Pagination::default(), None).await?;
//! for order in listings {
//!     println!("{} @ {}", order.order_id, order.price);
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

mod api;

mod client;
pub use client::{GatewayBuilder, GatewayClient};

pub mod error;
pub use error::GatewayError;

pub mod requests;
pub use requests::{
    CreateActivityRequest, CreateCollectionRequest, CreateItemRequest, CreateOrderRequest,
    Pagination, PriceUpdate, UpdateCollectionRequest,
};

pub mod response;
pub use response::Resource;

pub mod types;
pub use types::{
    Ack, Activity, ActivityType, Collection, HealthStatus, Item, MarketStats, Order, OrderStatus,
    OrderType, Page, UnknownVariant,
};

#[cfg(test)]
mod mock;
