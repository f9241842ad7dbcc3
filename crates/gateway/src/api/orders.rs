use crate::{
    GatewayClient,
    error::GatewayError,
    requests::{
        CreateOrderRequest, ListQuery, NoFilter, OrderTypeFilter, Pagination, StatusFilter,
    },
    response::decode_record,
    types::{Ack, Order, OrderStatus, OrderType, Page},
};
use alloy_primitives::Address;
use reqwest::Method;

impl GatewayClient {
    /// `POST /orders`: submits a new order for the acting account.
    pub async fn create_order(&self, order: &CreateOrderRequest) -> Result<Order, GatewayError> {
        self.send_record(Method::POST, &["orders"], order).await
    }

    /// `GET /orders`, optionally restricted to one kind of order.
    pub async fn orders(
        &self,
        pagination: Pagination,
        order_type: Option<OrderType>,
    ) -> Result<Page<Order>, GatewayError> {
        let query = ListQuery { pagination, filter: OrderTypeFilter { order_type }, q: None };
        self.get_page(&["orders"], &query).await
    }

    /// `GET /orders/{id}`
    pub async fn order(&self, id: u64) -> Result<Order, GatewayError> {
        self.get_record(&["orders", &id.to_string()]).await
    }

    /// `GET /orders/user/{address}`: orders made by `user`.
    pub async fn user_orders(
        &self,
        user: Address,
        pagination: Pagination,
        status: Option<OrderStatus>,
    ) -> Result<Page<Order>, GatewayError> {
        let query = ListQuery { pagination, filter: StatusFilter { status }, q: None };
        self.get_page(&["orders", "user", &user.to_string()], &query).await
    }

    /// `GET /orders/nft/{collection}/{token_id}`: orders on a single item.
    pub async fn item_orders(
        &self,
        collection: Address,
        token_id: &str,
        pagination: Pagination,
    ) -> Result<Page<Order>, GatewayError> {
        let query = ListQuery { pagination, filter: NoFilter {}, q: None };
        self.get_page(&["orders", "nft", &collection.to_string(), token_id], &query).await
    }

    /// `PUT /orders/{id}/cancel`
    ///
    /// The service only lets the maker cancel, identified by the `X-User-Address` header.
    pub async fn cancel_order(&self, id: u64) -> Result<Ack, GatewayError> {
        self.send_plain(Method::PUT, &["orders", &id.to_string(), "cancel"], None::<&()>).await
    }

    /// `POST /orders/sync/{id}`: asks the service to refresh the order from the chain.
    pub async fn sync_order(&self, id: u64) -> Result<Order, GatewayError> {
        self.call(Method::POST, &["orders", "sync", &id.to_string()], decode_record).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{COLLECTION, MAKER, MockService, order_json};
    use serde_json::json;

    #[tokio::test]
    async fn list_orders() {
        let service = MockService::default().reply(
            "GET /orders",
            json!({
                "message": "ok",
                "data": {
                    "orders": [order_json(1), order_json(2)],
                    "total": 2, "page": 1, "page_size": 20, "total_pages": 1
                }
            }),
        );
        let client = GatewayClient::new(&service.spawn().await).unwrap();

        let page = client.orders(Pagination::new(0, 500), Some(OrderType::Bid)).await.unwrap();
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.records[1].id, 2);
        assert_eq!(service.last().uri, "/api/v1/orders?page=1&page_size=20&order_type=2");

        client.orders(Pagination::new(3, 50), None).await.unwrap();
        assert_eq!(service.last().uri, "/api/v1/orders?page=3&page_size=50");
    }

    #[tokio::test]
    async fn user_and_item_orders() {
        let maker: Address = MAKER.parse().unwrap();
        let collection: Address = COLLECTION.parse().unwrap();
        let service = MockService::default()
            .reply(&format!("GET /orders/user/{maker}"), json!({ "orders": [order_json(4)] }))
            .reply(&format!("GET /orders/nft/{collection}/1"), json!([order_json(5)]));
        let client = GatewayClient::new(&service.spawn().await).unwrap();

        let page = client
            .user_orders(maker, Pagination::default(), Some(OrderStatus::Cancelled))
            .await
            .unwrap();
        assert_eq!(page.records[0].maker, Some(maker));
        assert!(service.last().uri.ends_with("?page=1&page_size=20&status=2"));

        let page = client.item_orders(collection, "1", Pagination::default()).await.unwrap();
        assert_eq!(page.records[0].id, 5);
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn order_lifecycle() {
        let service = MockService::default()
            .reply("POST /orders", json!({ "message": "created", "data": order_json(9) }))
            .reply("GET /orders/9", json!({ "message": "ok", "data": order_json(9) }))
            .reply("PUT /orders/9/cancel", json!({ "message": "order cancelled" }))
            .reply("POST /orders/sync/9", json!({ "message": "synced", "data": order_json(9) }));
        let base = service.spawn().await;
        let maker: Address = MAKER.parse().unwrap();
        let client = GatewayClient::builder(&base).accounts(maker).build().unwrap();

        let request = CreateOrderRequest::new(OrderType::Listing, 1.5)
            .token(COLLECTION.parse().unwrap(), "1");
        let order = client.create_order(&request).await.unwrap();
        assert_eq!(order.order_type, OrderType::Listing);
        let created = service.last();
        assert_eq!(created.user.as_deref(), Some(MAKER));
        assert_eq!(created.body["order_type"], json!(1));
        assert_eq!(created.body["price"], json!(1.5));

        assert_eq!(client.order(9).await.unwrap(), order);

        let ack = client.cancel_order(9).await.unwrap();
        assert_eq!(ack.message.as_deref(), Some("order cancelled"));
        assert_eq!(service.last().method, "PUT");

        assert_eq!(client.sync_order(9).await.unwrap().id, 9);
        assert_eq!(service.requests().len(), 4);
    }
}
