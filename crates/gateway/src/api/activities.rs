use crate::{
    GatewayClient,
    error::GatewayError,
    requests::{CreateActivityRequest, ListQuery, NoFilter, Pagination},
    types::{Activity, Page},
};
use alloy_primitives::Address;
use reqwest::Method;

impl GatewayClient {
    /// `POST /activities`: records a marketplace event.
    pub async fn create_activity(
        &self,
        activity: &CreateActivityRequest,
    ) -> Result<Activity, GatewayError> {
        self.send_record(Method::POST, &["activities"], activity).await
    }

    /// `GET /activities`
    pub async fn activities(&self, pagination: Pagination) -> Result<Page<Activity>, GatewayError> {
        let query = ListQuery { pagination, filter: NoFilter {}, q: None };
        self.get_page(&["activities"], &query).await
    }

    /// `GET /activities/{id}`
    pub async fn activity(&self, id: u64) -> Result<Activity, GatewayError> {
        self.get_record(&["activities", &id.to_string()]).await
    }

    /// `GET /activities/user/{address}`
    pub async fn user_activities(
        &self,
        user: Address,
        pagination: Pagination,
    ) -> Result<Page<Activity>, GatewayError> {
        let query = ListQuery { pagination, filter: NoFilter {}, q: None };
        self.get_page(&["activities", "user", &user.to_string()], &query).await
    }

    /// `GET /activities/item/{collection}/{token_id}`: the history of a single item.
    pub async fn item_activities(
        &self,
        collection: Address,
        token_id: &str,
        pagination: Pagination,
    ) -> Result<Page<Activity>, GatewayError> {
        let query = ListQuery { pagination, filter: NoFilter {}, q: None };
        self.get_page(&["activities", "item", &collection.to_string(), token_id], &query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        mock::{COLLECTION, MAKER, MockService, activity_json},
        types::ActivityType,
    };
    use serde_json::json;

    #[tokio::test]
    async fn activity_history() {
        let user: Address = MAKER.parse().unwrap();
        let collection: Address = COLLECTION.parse().unwrap();
        let service = MockService::default()
            .reply("GET /activities/4", json!({ "activity": activity_json(4) }))
            .reply(&format!("GET /activities/user/{user}"), json!({ "activities": [] }))
            .reply(
                &format!("GET /activities/item/{collection}/1"),
                json!({ "activities": [activity_json(1), activity_json(2)] }),
            )
            .reply(
                "GET /activities",
                json!({
                    "activities": [activity_json(3)],
                    "total": 21, "page": 1, "page_size": 20, "total_pages": 2
                }),
            );
        let client = GatewayClient::new(&service.spawn().await).unwrap();

        let activity = client.activity(4).await.unwrap();
        assert_eq!(activity.activity_type, ActivityType::Transfer);
        assert_eq!(activity.maker, Some(user));
        assert!(activity.tx_hash.is_some());

        assert!(client.user_activities(user, Pagination::default()).await.unwrap().is_empty());

        let history =
            client.item_activities(collection, "1", Pagination::default()).await.unwrap();
        assert_eq!(history.records.len(), 2);

        let page = client.activities(Pagination::default()).await.unwrap();
        assert!(page.has_more());
    }

    #[tokio::test]
    async fn record_activity() {
        let service = MockService::default()
            .reply("POST /activities", json!({ "activity": activity_json(11) }));
        let client = GatewayClient::new(&service.spawn().await).unwrap();

        let request = CreateActivityRequest {
            activity_type: ActivityType::Mint,
            maker: None,
            taker: Some(MAKER.parse().unwrap()),
            collection_address: Some(COLLECTION.parse().unwrap()),
            token_id: Some("11".into()),
            price: 0.0,
            block_number: 42,
            tx_hash: None,
            event_time: None,
        };
        assert_eq!(client.create_activity(&request).await.unwrap().id, 11);

        let body = service.last().body;
        assert_eq!(body["activity_type"], json!(2));
        assert_eq!(body["block_number"], json!(42));
        assert!(body.get("tx_hash").is_none());
    }
}
