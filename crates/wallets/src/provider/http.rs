use super::{EVENT_CHANNEL_CAPACITY, ProviderEvent, WalletProvider, WalletProviderExt};
use crate::error::{ProviderError, ProviderRpcError};
use alloy_primitives::{Address, ChainId};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{Value, json};
use std::{
    fmt,
    sync::{
        Arc, Weak,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};
use tokio::{sync::broadcast, task::JoinHandle};
use url::Url;

/// A wallet capability reached over JSON-RPC on HTTP, e.g. a dev node or a wallet bridge.
///
/// HTTP has no push channel, so notifications are derived by polling `eth_accounts` and
/// `eth_chainId`. Polling starts with the first [`subscribe`](WalletProvider::subscribe) call and
/// stops once every receiver is gone or the provider is dropped. A later `subscribe` starts it
/// again.
#[derive(Clone)]
pub struct HttpWalletProvider {
    inner: Arc<Inner>,
}

struct Inner {
    client: reqwest::Client,
    url: Url,
    next_id: AtomicU64,
    poll_interval: Duration,
    events: broadcast::Sender<ProviderEvent>,
    watcher: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(watcher) = self.watcher.get_mut().take() {
            watcher.abort();
        }
    }
}

impl fmt::Debug for HttpWalletProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpWalletProvider")
            .field("url", &self.inner.url.as_str())
            .field("poll_interval", &self.inner.poll_interval)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<ProviderRpcError>,
}

impl HttpWalletProvider {
    /// Creates a provider for the given endpoint.
    pub fn new(
        url: Url,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ProviderError::Transport(err.into()))?;
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Ok(Self {
            inner: Arc::new(Inner {
                client,
                url,
                next_id: AtomicU64::new(1),
                poll_interval,
                events,
                watcher: Mutex::new(None),
            }),
        })
    }

    /// Parses `url` and creates a provider for it.
    pub fn from_url_str(
        url: &str,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<Self, ProviderError> {
        let url = Url::parse(url).map_err(|err| ProviderError::Transport(err.into()))?;
        Self::new(url, timeout, poll_interval)
    }

    /// The endpoint this provider talks to.
    pub fn url(&self) -> &Url {
        &self.inner.url
    }

    fn ensure_watcher(&self) {
        let mut watcher = self.inner.watcher.lock();
        if watcher.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return;
        }
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("no tokio runtime, wallet notifications are disabled");
            return;
        };
        let weak = Arc::downgrade(&self.inner);
        *watcher = Some(handle.spawn(watch(weak, self.inner.poll_interval)));
    }
}

impl Inner {
    async fn send(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params });
        trace!(target: "wallets::http", %method, id, "sending wallet request");

        let response = self
            .client
            .post(self.url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|err| ProviderError::Transport(err.into()))?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|err| ProviderError::Transport(err.into()))?;

        // Nodes answer JSON-RPC errors with both 200 and 4xx/5xx statuses.
        match serde_json::from_slice::<JsonRpcResponse>(&bytes) {
            Ok(JsonRpcResponse { error: Some(err), .. }) => {
                debug!(target: "wallets::http", %method, code = err.code, "wallet error response");
                Err(err.into())
            }
            Ok(JsonRpcResponse { result, .. }) if status.is_success() => {
                Ok(result.unwrap_or(Value::Null))
            }
            Ok(_) => Err(ProviderError::Transport(
                format!("wallet endpoint responded with {status}").into(),
            )),
            Err(_) if !status.is_success() => Err(ProviderError::Transport(
                format!("wallet endpoint responded with {status}").into(),
            )),
            Err(err) => Err(ProviderError::invalid_response(method, err)),
        }
    }
}

#[async_trait]
impl WalletProvider for Inner {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        self.send(method, params).await
    }

    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent> {
        self.events.subscribe()
    }
}

impl fmt::Debug for Inner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inner").field("url", &self.url.as_str()).finish_non_exhaustive()
    }
}

#[async_trait]
impl WalletProvider for HttpWalletProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        self.inner.request(method, params).await
    }

    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent> {
        let rx = self.inner.subscribe();
        self.ensure_watcher();
        rx
    }
}

/// Polls the wallet and turns observed differences into notifications.
async fn watch(inner: Weak<Inner>, poll_interval: Duration) {
    let mut interval = tokio::time::interval(poll_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let mut last_accounts: Option<Vec<Address>> = None;
    let mut last_chain: Option<ChainId> = None;

    loop {
        interval.tick().await;
        let Some(inner) = inner.upgrade() else { break };
        {
            // checked under the watcher lock so a concurrent `subscribe` either keeps this task
            // alive or sees the slot empty and spawns a new one
            let mut watcher = inner.watcher.lock();
            if inner.events.receiver_count() == 0 {
                trace!(target: "wallets::http", "no subscribers left, stopping the poller");
                *watcher = None;
                break;
            }
        }

        match inner.accounts().await {
            Ok(accounts) => {
                if last_accounts.as_ref().is_some_and(|last| *last != accounts) {
                    let _ = inner.events.send(ProviderEvent::AccountsChanged(accounts.clone()));
                }
                last_accounts = Some(accounts);
            }
            Err(err) => debug!(target: "wallets::http", %err, "failed to poll accounts"),
        }

        match inner.chain_id().await {
            Ok(chain_id) => {
                if last_chain.is_some_and(|last| last != chain_id) {
                    let _ = inner.events.send(ProviderEvent::ChainChanged(chain_id));
                }
                last_chain = Some(chain_id);
            }
            Err(err) => debug!(target: "wallets::http", %err, "failed to poll chain id"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{UNRECOGNIZED_CHAIN, USER_REJECTED_REQUEST};
    use axum::{Json, Router, extract::State, routing::post};
    use nftm_common::{DEV_ACCOUNTS, DEV_CHAIN_ID};
    use std::sync::atomic::AtomicU64 as Counter;

    #[derive(Default)]
    struct Node {
        chain_id: Counter,
        rejections: bool,
        account_polls: Counter,
    }

    async fn rpc(State(node): State<Arc<Node>>, Json(body): Json<Value>) -> Json<Value> {
        let id = body["id"].clone();
        let method = body["method"].as_str().unwrap_or_default();
        let reply = match method {
            "eth_requestAccounts" if node.rejections => json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": USER_REJECTED_REQUEST, "message": "User rejected the request." }
            }),
            "eth_accounts" | "eth_requestAccounts" => {
                if method == "eth_accounts" {
                    node.account_polls.fetch_add(1, Ordering::SeqCst);
                }
                json!({ "jsonrpc": "2.0", "id": id, "result": [DEV_ACCOUNTS[0]] })
            }
            "eth_chainId" => {
                let chain_id = node.chain_id.load(Ordering::SeqCst);
                json!({ "jsonrpc": "2.0", "id": id, "result": format!("{chain_id:#x}") })
            }
            "wallet_switchEthereumChain" => json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": UNRECOGNIZED_CHAIN, "message": "Unrecognized chain ID" }
            }),
            _ => json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": -32601, "message": "Method not found" }
            }),
        };
        Json(reply)
    }

    async fn spawn_node(node: Arc<Node>) -> Url {
        let app = Router::new().route("/", post(rpc)).with_state(node);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}/").parse().unwrap()
    }

    fn provider(url: Url) -> HttpWalletProvider {
        HttpWalletProvider::new(url, Duration::from_secs(5), Duration::from_millis(50)).unwrap()
    }

    #[tokio::test]
    async fn typed_requests() {
        let node = Arc::new(Node { chain_id: Counter::new(DEV_CHAIN_ID), ..Default::default() });
        let provider = provider(spawn_node(node).await);

        assert_eq!(provider.request_accounts().await.unwrap(), vec![DEV_ACCOUNTS[0]]);
        assert_eq!(provider.chain_id().await.unwrap(), DEV_CHAIN_ID);
    }

    #[tokio::test]
    async fn rpc_errors_keep_their_code() {
        let node =
            Arc::new(Node { chain_id: Counter::new(1), rejections: true, ..Default::default() });
        let provider = provider(spawn_node(node).await);

        let err = provider.request_accounts().await.unwrap_err();
        assert!(err.is_user_rejection(), "{err:?}");

        let err = provider.switch_chain(10).await.unwrap_err();
        assert!(err.as_rpc_error().unwrap().is_unrecognized_chain(), "{err:?}");

        let err = provider.request("eth_mine", json!([])).await.unwrap_err();
        assert_eq!(err.as_rpc_error().unwrap().code, -32601);
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url: Url = format!("http://{}/", listener.local_addr().unwrap()).parse().unwrap();
        drop(listener);

        let err = provider(url).accounts().await.unwrap_err();
        assert!(matches!(err, ProviderError::Transport(_)), "{err:?}");
    }

    #[tokio::test]
    async fn polling_emits_chain_changes() {
        let node = Arc::new(Node { chain_id: Counter::new(1), ..Default::default() });
        let provider = provider(spawn_node(node.clone()).await);
        let mut events = provider.subscribe();

        // let the watcher record the initial state
        tokio::time::sleep(Duration::from_millis(150)).await;
        node.chain_id.store(5, Ordering::SeqCst);

        let event = tokio::time::timeout(Duration::from_secs(5), events.recv()).await.unwrap();
        assert_eq!(event.unwrap(), ProviderEvent::ChainChanged(5));
    }

    #[tokio::test]
    async fn polling_stops_without_subscribers() {
        let node = Arc::new(Node { chain_id: Counter::new(1), ..Default::default() });
        let provider = provider(spawn_node(node.clone()).await);

        let events = provider.subscribe();
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(node.account_polls.load(Ordering::SeqCst) > 0);
        drop(events);

        // one tick to notice, plus slack for a poll already in flight
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(provider.inner.watcher.lock().is_none());
        let stopped_at = node.account_polls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(node.account_polls.load(Ordering::SeqCst), stopped_at);

        // subscribing again restarts polling
        let _events = provider.subscribe();
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(node.account_polls.load(Ordering::SeqCst) > stopped_at);
    }
}
