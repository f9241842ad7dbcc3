use crate::{
    GatewayClient,
    error::GatewayError,
    requests::{CreateCollectionRequest, ListQuery, NoFilter, Pagination, UpdateCollectionRequest},
    types::{Ack, Collection, Page},
};
use alloy_primitives::Address;
use reqwest::Method;

impl GatewayClient {
    /// `POST /collections`
    pub async fn create_collection(
        &self,
        collection: &CreateCollectionRequest,
    ) -> Result<Collection, GatewayError> {
        self.send_record(Method::POST, &["collections"], collection).await
    }

    /// `PUT /collections/{id}`: applies the fields set in `update`.
    pub async fn update_collection(
        &self,
        id: u64,
        update: &UpdateCollectionRequest,
    ) -> Result<Ack, GatewayError> {
        self.send_plain(Method::PUT, &["collections", &id.to_string()], Some(update)).await
    }

    /// `GET /collections`
    pub async fn collections(
        &self,
        pagination: Pagination,
    ) -> Result<Page<Collection>, GatewayError> {
        let query = ListQuery { pagination, filter: NoFilter {}, q: None };
        self.get_page(&["collections"], &query).await
    }

    /// `GET /collections/{id}`
    pub async fn collection(&self, id: u64) -> Result<Collection, GatewayError> {
        self.get_record(&["collections", &id.to_string()]).await
    }

    /// `GET /collections/address/{address}`: the collection deployed at `address`.
    pub async fn collection_by_address(
        &self,
        address: Address,
    ) -> Result<Collection, GatewayError> {
        self.get_record(&["collections", "address", &address.to_string()]).await
    }
}
