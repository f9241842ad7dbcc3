use crate::{
    GatewayClient,
    error::GatewayError,
    types::{HealthStatus, MarketStats},
};
use reqwest::Method;

impl GatewayClient {
    /// `GET /market/stats`
    pub async fn market_stats(&self) -> Result<MarketStats, GatewayError> {
        self.send_plain(Method::GET, &["market", "stats"], None::<&()>).await
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<HealthStatus, GatewayError> {
        self.send_plain(Method::GET, &["health"], None::<&()>).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockService;
    use nftm_common::TEST_ACCOUNT;
    use serde_json::json;

    #[tokio::test]
    async fn stats_and_health() {
        let service = MockService::default()
            .reply("GET /market/stats", json!({ "message": "market stats", "data": null }))
            .reply("GET /health", json!({ "status": "ok", "message": "running" }));
        let base = service.spawn().await;

        let client = GatewayClient::new(&base).unwrap();
        let stats = client.market_stats().await.unwrap();
        assert_eq!(stats.data, None);
        assert!(client.health().await.unwrap().is_ok());
        assert!(service.requests().iter().all(|request| request.user.is_none()));

        let client = GatewayClient::builder(&base).accounts(TEST_ACCOUNT).build().unwrap();
        client.health().await.unwrap();
        assert_eq!(service.last().user, Some(TEST_ACCOUNT.to_string()));
    }
}
