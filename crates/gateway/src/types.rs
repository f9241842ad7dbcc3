//! Records exchanged with the marketplace API.
//!
//! Enumerations travel as their integer codes. Optional fields are `null` or absent on the wire.

use alloy_primitives::{Address, B256, ChainId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};

/// Error returned when an integer code or a name doesn't match any variant.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

/// Declares a fieldless enum that is encoded as an integer code and parsed from either its code
/// or its kebab-case name.
macro_rules! coded_enum {
    (
        $(#[$attr:meta])*
        $name:ident: $kind:literal {
            $($(#[$vattr:meta])* $variant:ident = $code:literal => $label:literal,)+
        }
    ) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "u8", into = "u8")]
        #[repr(u8)]
        pub enum $name {
            $($(#[$vattr])* $variant = $code,)+
        }

        impl $name {
            /// All variants, in code order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            pub const fn code(self) -> u8 {
                self as u8
            }

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> Self {
                value.code()
            }
        }

        impl TryFrom<u8> for $name {
            type Error = UnknownVariant;

            fn try_from(code: u8) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok(Self::$variant),)+
                    _ => Err(UnknownVariant { kind: $kind, value: code.to_string() }),
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if let Ok(code) = s.parse::<u8>() {
                    return Self::try_from(code);
                }
                let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
                Self::ALL
                    .iter()
                    .copied()
                    .find(|variant| variant.as_str() == normalized)
                    .ok_or_else(|| UnknownVariant { kind: $kind, value: s.to_string() })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

coded_enum! {
    /// The kind of an order.
    OrderType: "order type" {
        Listing = 1 => "listing",
        /// An offer on a single item, also called a bid.
        Bid = 2 => "bid",
        CollectionBid = 3 => "collection-bid",
        ItemBid = 4 => "item-bid",
    }
}

coded_enum! {
    OrderStatus: "order status" {
        Active = 0 => "active",
        Filled = 1 => "filled",
        Cancelled = 2 => "cancelled",
        Expired = 3 => "expired",
    }
}

coded_enum! {
    /// What happened in a marketplace [`Activity`].
    ActivityType: "activity type" {
        Buy = 1 => "buy",
        Mint = 2 => "mint",
        List = 3 => "list",
        CancelListing = 4 => "cancel-listing",
        CancelOffer = 5 => "cancel-offer",
        MakeOffer = 6 => "make-offer",
        Sell = 7 => "sell",
        Transfer = 8 => "transfer",
        CollectionBid = 9 => "collection-bid",
        ItemBid = 10 => "item-bid",
    }
}

/// An order as stored by the service. Read-only on the client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    #[serde(default)]
    pub marketplace_id: i8,
    /// The order hash.
    pub order_id: String,
    pub order_status: OrderStatus,
    pub order_type: OrderType,
    #[serde(default)]
    pub event_time: Option<i64>,
    #[serde(default)]
    pub collection_address: Option<Address>,
    #[serde(default)]
    pub token_id: Option<String>,
    #[serde(default)]
    pub expire_time: Option<i64>,
    pub price: f64,
    #[serde(default)]
    pub maker: Option<Address>,
    #[serde(default)]
    pub taker: Option<Address>,
    #[serde(default = "one")]
    pub quantity_remaining: i64,
    #[serde(default = "one")]
    pub size: i64,
    #[serde(default)]
    pub salt: Option<i64>,
    #[serde(default)]
    pub currency_address: String,
    #[serde(default)]
    pub create_time: Option<i64>,
    #[serde(default)]
    pub update_time: Option<i64>,
}

impl Order {
    pub fn is_active(&self) -> bool {
        self.order_status == OrderStatus::Active
    }
}

const fn one() -> i64 {
    1
}

/// A single token of a collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub chain_id: ChainId,
    pub token_id: String,
    pub name: String,
    #[serde(default)]
    pub owner: Option<Address>,
    #[serde(default)]
    pub collection_address: Option<Address>,
    pub creator: Address,
    pub supply: i64,
    #[serde(default)]
    pub list_price: Option<f64>,
    #[serde(default)]
    pub list_time: Option<i64>,
    #[serde(default)]
    pub sale_price: Option<f64>,
    #[serde(default)]
    pub create_time: Option<i64>,
    #[serde(default)]
    pub update_time: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: u64,
    pub chain_id: ChainId,
    pub symbol: String,
    pub name: String,
    pub creator: Address,
    pub address: Address,
    #[serde(default)]
    pub owner_amount: i64,
    #[serde(default)]
    pub item_amount: i64,
    /// Lowest listing price across the collection.
    #[serde(default)]
    pub floor_price: Option<f64>,
    /// Highest bid across the collection.
    #[serde(default)]
    pub sale_price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub volume_total: Option<f64>,
    #[serde(default)]
    pub image_uri: Option<String>,
    #[serde(default)]
    pub create_time: Option<i64>,
    #[serde(default)]
    pub update_time: Option<i64>,
}

/// A marketplace event, e.g. a sale or a transfer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: u64,
    pub activity_type: ActivityType,
    /// For transfers and sales the sending side, otherwise the initiator.
    #[serde(default)]
    pub maker: Option<Address>,
    #[serde(default)]
    pub taker: Option<Address>,
    #[serde(default)]
    pub marketplace_id: i8,
    #[serde(default)]
    pub collection_address: Option<Address>,
    #[serde(default)]
    pub token_id: Option<String>,
    #[serde(default)]
    pub currency_address: String,
    pub price: f64,
    #[serde(default)]
    pub block_number: i64,
    #[serde(default)]
    pub tx_hash: Option<B256>,
    #[serde(default)]
    pub event_time: Option<i64>,
    #[serde(default)]
    pub create_time: Option<i64>,
    #[serde(default)]
    pub update_time: Option<i64>,
}

/// One page of a listing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    pub records: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// A single page holding all of `records`.
    pub fn from_records(records: Vec<T>) -> Self {
        let len = records.len();
        Self {
            total: len as u64,
            page: 1,
            page_size: len as u32,
            total_pages: u32::from(len > 0),
            records,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether pages after this one exist.
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// Acknowledgement of an update that returns no record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

/// Market-wide statistics.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketStats {
    #[serde(default)]
    pub message: Option<String>,
    /// Statistics payload; `None` while the service has nothing to report.
    #[serde(default)]
    pub data: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}
