//! Request bodies and query parameters.

use crate::types::{ActivityType, OrderStatus, OrderType};
use alloy_primitives::{Address, B256};
use nftm_common::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use serde::Serialize;

/// Page selection for listings.
///
/// Values the service would not accept are replaced: a page of `0` becomes `1` and a page size
/// outside `1..=100` becomes the default of `20`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Pagination {
    page: u32,
    page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, page_size: DEFAULT_PAGE_SIZE }
    }
}

impl Pagination {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self::default().page(page).page_size(page_size)
    }

    /// Selects the 1-based `page`.
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size =
            if (1..=MAX_PAGE_SIZE).contains(&page_size) { page_size } else { DEFAULT_PAGE_SIZE };
        self
    }

    pub fn current_page(&self) -> u32 {
        self.page
    }

    pub fn current_page_size(&self) -> u32 {
        self.page_size
    }

    /// The following page.
    pub fn next(self) -> Self {
        Self { page: self.page.saturating_add(1), ..self }
    }
}

/// Query of a listing: the page plus optional filters.
#[derive(Serialize)]
pub(crate) struct ListQuery<'a, F: Serialize> {
    #[serde(flatten)]
    pub(crate) pagination: Pagination,
    #[serde(flatten)]
    pub(crate) filter: F,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) q: Option<&'a str>,
}

#[derive(Serialize)]
pub(crate) struct NoFilter {}

#[derive(Serialize)]
pub(crate) struct OrderTypeFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) order_type: Option<OrderType>,
}

#[derive(Serialize)]
pub(crate) struct StatusFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) status: Option<OrderStatus>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreateOrderRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
    pub order_type: OrderType,
    pub price: f64,
    /// Unix timestamp in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_time: Option<i64>,
    pub quantity_remaining: i64,
    pub size: i64,
    pub currency_address: String,
}

impl CreateOrderRequest {
    /// A single-unit order on one token, priced in the native currency.
    pub fn new(order_type: OrderType, price: f64) -> Self {
        Self {
            collection_address: None,
            token_id: None,
            order_type,
            price,
            expire_time: None,
            quantity_remaining: 1,
            size: 1,
            currency_address: "0x0".to_string(),
        }
    }

    pub fn token(mut self, collection: Address, token_id: impl Into<String>) -> Self {
        self.collection_address = Some(collection);
        self.token_id = Some(token_id.into());
        self
    }

    pub fn expire_time(mut self, expire_time: i64) -> Self {
        self.expire_time = Some(expire_time);
        self
    }
}

/// Creates an item, or updates the item with the same collection and token id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreateItemRequest {
    pub token_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_address: Option<Address>,
    pub creator: Address,
    pub supply: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreateCollectionRequest {
    pub symbol: String,
    pub name: String,
    pub creator: Address,
    pub address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
}

/// Partial update of a collection; only the set fields are sent.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UpdateCollectionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_total: Option<f64>,
}

impl UpdateCollectionRequest {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreateActivityRequest {
    pub activity_type: ActivityType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maker: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taker: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
    pub price: f64,
    pub block_number: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<B256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_time: Option<i64>,
}

#[derive(Serialize)]
pub(crate) struct OwnerUpdate {
    pub(crate) owner: Address,
}

/// New prices of an item; unset prices are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PriceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
}
