//! Decoding of the service's response shapes.
//!
//! Depending on the endpoint a record arrives bare, as `{"message", "data"}` or keyed by its
//! name (`{"order": ...}`); a listing arrives as a bare array or as a page object whose records
//! are keyed by the plural name.

use crate::types::{Activity, Collection, Item, Order, Page};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Map, Value};

/// A record type served by the API.
pub trait Resource: DeserializeOwned {
    /// Key of a single record, e.g. `order`.
    const SINGULAR: &'static str;
    /// Key of the records of a page, e.g. `orders`.
    const PLURAL: &'static str;
}

impl Resource for Order {
    const SINGULAR: &'static str = "order";
    const PLURAL: &'static str = "orders";
}

impl Resource for Item {
    const SINGULAR: &'static str = "item";
    const PLURAL: &'static str = "items";
}

impl Resource for Collection {
    const SINGULAR: &'static str = "collection";
    const PLURAL: &'static str = "collections";
}

impl Resource for Activity {
    const SINGULAR: &'static str = "activity";
    const PLURAL: &'static str = "activities";
}

#[derive(Default, Deserialize)]
struct PageMeta {
    #[serde(default)]
    total: Option<u64>,
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    page_size: Option<u32>,
    #[serde(default)]
    total_pages: Option<u32>,
}

/// Returns the payload of a `{"message", "data"}` envelope, or `value` if it isn't one.
fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.get("data").is_some_and(|data| !data.is_null()) => {
            map.remove("data").unwrap_or_default()
        }
        value => value,
    }
}

fn take_key(map: &mut Map<String, Value>, key: &str) -> Option<Value> {
    map.get(key).is_some_and(|value| !value.is_null()).then(|| map.remove(key)).flatten()
}

pub(crate) fn decode_record<T: Resource>(value: Value) -> Result<T, serde_json::Error> {
    let value = match unwrap_data(value) {
        Value::Object(mut map) => take_key(&mut map, T::SINGULAR).unwrap_or(Value::Object(map)),
        value => value,
    };
    serde_json::from_value(value)
}

pub(crate) fn decode_page<T: Resource>(value: Value) -> Result<Page<T>, serde_json::Error> {
    match unwrap_data(value) {
        Value::Null => Ok(Page::from_records(Vec::new())),
        Value::Array(records) => {
            let records = serde_json::from_value(Value::Array(records))?;
            Ok(Page::from_records(records))
        }
        Value::Object(mut map) => {
            let records: Vec<T> = match take_key(&mut map, T::PLURAL) {
                Some(records) => serde_json::from_value(records)?,
                None => Vec::new(),
            };
            let meta: PageMeta = serde_json::from_value(Value::Object(map))?;
            let single = Page::from_records(records);
            Ok(Page {
                total: meta.total.unwrap_or(single.total),
                page: meta.page.unwrap_or(single.page).max(1),
                page_size: meta.page_size.unwrap_or(single.page_size),
                total_pages: meta.total_pages.unwrap_or(single.total_pages),
                records: single.records,
            })
        }
        value => Err(serde::de::Error::custom(format!("expected a list of records, got {value}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ActivityType;
    use serde_json::json;

    fn activity(id: u64) -> Value {
        json!({
            "id": id,
            "activity_type": 2,
            "maker": null,
            "taker": "0x70997970c51812dc3a010c7d01b50e0d17dc79c8",
            "marketplace_id": 0,
            "collection_address": "0x5fbdb2315678afecb367f032d93f642f64180aa3",
            "token_id": "1",
            "currency_address": "1",
            "price": 0,
            "block_number": 12,
            "tx_hash": null,
            "event_time": 1700000000
        })
    }

    #[test]
    fn record_shapes() {
        let bare: Activity = decode_record(activity(1)).unwrap();
        let keyed: Activity = decode_record(json!({ "activity": activity(1) })).unwrap();
        let enveloped: Activity =
            decode_record(json!({ "message": "ok", "data": activity(1) })).unwrap();

        assert_eq!(bare.activity_type, ActivityType::Mint);
        assert_eq!(bare, keyed);
        assert_eq!(bare, enveloped);
    }

    #[test]
    fn page_object() {
        let page: Page<Activity> = decode_page(json!({
            "activities": [activity(1), activity(2)],
            "total": 12,
            "page": 2,
            "page_size": 2,
            "total_pages": 6
        }))
        .unwrap();

        assert_eq!(page.records.iter().map(|a| a.id).collect::<Vec<_>>(), [1, 2]);
        assert_eq!((page.total, page.page, page.page_size, page.total_pages), (12, 2, 2, 6));
        assert!(page.has_more());
    }

    #[test]
    fn bare_and_partial_lists() {
        let page: Page<Activity> =
            decode_page(json!([activity(1), activity(2), activity(3)])).unwrap();
        assert_eq!(page.total, 3);
        assert!(!page.has_more());

        let page: Page<Activity> = decode_page(json!({ "activities": [activity(4)] })).unwrap();
        assert_eq!((page.total, page.page, page.total_pages), (1, 1, 1));

        let page: Page<Activity> =
            decode_page(json!({ "message": "ok", "data": [activity(5)] })).unwrap();
        assert_eq!(page.records[0].id, 5);

        let page: Page<Activity> = decode_page(json!({ "activities": null })).unwrap();
        assert!(page.is_empty());

        let page: Page<Activity> = decode_page(json!({ "message": "ok", "data": null })).unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn wrong_shape() {
        assert!(decode_page::<Activity>(json!("nope")).is_err());
        assert!(decode_record::<Activity>(json!({ "message": "ok" })).is_err());
    }
}
