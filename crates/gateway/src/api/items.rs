use crate::{
    GatewayClient,
    error::GatewayError,
    requests::{CreateItemRequest, ListQuery, NoFilter, OwnerUpdate, Pagination, PriceUpdate},
    types::{Ack, Item, Page},
};
use alloy_primitives::Address;
use reqwest::Method;

impl GatewayClient {
    /// `POST /items`: creates the item, or updates it if the token is already known.
    pub async fn upsert_item(&self, item: &CreateItemRequest) -> Result<Item, GatewayError> {
        self.send_record(Method::POST, &["items"], item).await
    }

    /// `GET /items`
    pub async fn items(&self, pagination: Pagination) -> Result<Page<Item>, GatewayError> {
        self.get_page(&["items"], &ListQuery { pagination, filter: NoFilter {}, q: None }).await
    }

    /// `GET /items/id/{id}`
    pub async fn item(&self, id: u64) -> Result<Item, GatewayError> {
        self.get_record(&["items", "id", &id.to_string()]).await
    }

    /// `GET /items/token/{collection}/{token_id}`
    pub async fn item_by_token(
        &self,
        collection: Address,
        token_id: &str,
    ) -> Result<Item, GatewayError> {
        self.get_record(&["items", "token", &collection.to_string(), token_id]).await
    }

    /// `GET /items/owner/{address}`
    pub async fn owner_items(
        &self,
        owner: Address,
        pagination: Pagination,
    ) -> Result<Page<Item>, GatewayError> {
        let query = ListQuery { pagination, filter: NoFilter {}, q: None };
        self.get_page(&["items", "owner", &owner.to_string()], &query).await
    }

    /// `GET /items/collection/{address}`
    pub async fn collection_items(
        &self,
        collection: Address,
        pagination: Pagination,
    ) -> Result<Page<Item>, GatewayError> {
        let query = ListQuery { pagination, filter: NoFilter {}, q: None };
        self.get_page(&["items", "collection", &collection.to_string()], &query).await
    }

    /// `GET /items/search?q=`: items whose name matches `keyword`.
    pub async fn search_items(
        &self,
        keyword: &str,
        pagination: Pagination,
    ) -> Result<Page<Item>, GatewayError> {
        let query = ListQuery { pagination, filter: NoFilter {}, q: Some(keyword) };
        self.get_page(&["items", "search"], &query).await
    }

    /// `PUT /items/token/{collection}/{token_id}/owner`
    pub async fn set_item_owner(
        &self,
        collection: Address,
        token_id: &str,
        owner: Address,
    ) -> Result<Ack, GatewayError> {
        let collection = collection.to_string();
        let segments = ["items", "token", collection.as_str(), token_id, "owner"];
        self.send_plain(Method::PUT, &segments, Some(&OwnerUpdate { owner })).await
    }

    /// `PUT /items/token/{collection}/{token_id}/price`
    pub async fn set_item_price(
        &self,
        collection: Address,
        token_id: &str,
        prices: &PriceUpdate,
    ) -> Result<Ack, GatewayError> {
        let collection = collection.to_string();
        let segments = ["items", "token", collection.as_str(), token_id, "price"];
        self.send_plain(Method::PUT, &segments, Some(prices)).await
    }
}
