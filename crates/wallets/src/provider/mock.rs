use super::{EVENT_CHANNEL_CAPACITY, ProviderEvent, WalletProvider};
use crate::error::ProviderError;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use tokio::sync::broadcast;

type Reply = Box<dyn Fn(&Value) -> Result<Value, ProviderError> + Send + Sync>;

/// A scripted in-memory wallet.
///
/// Each method answers with its queued one-shot replies first, then with its standing reply.
/// Unscripted methods fail with a "method not found" error.
pub(crate) struct MockProvider {
    standing: Mutex<HashMap<String, Reply>>,
    queued: Mutex<HashMap<String, VecDeque<Result<Value, ProviderError>>>>,
    calls: Mutex<Vec<(String, Value)>>,
    events: broadcast::Sender<ProviderEvent>,
}

impl std::fmt::Debug for MockProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockProvider").field("calls", &*self.calls.lock()).finish_non_exhaustive()
    }
}

impl MockProvider {
    pub(crate) fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            standing: Default::default(),
            queued: Default::default(),
            calls: Default::default(),
            events,
        }
    }

    pub(crate) fn on(
        self,
        method: &str,
        reply: impl Fn(&Value) -> Result<Value, ProviderError> + Send + Sync + 'static,
    ) -> Self {
        self.standing.lock().insert(method.to_string(), Box::new(reply));
        self
    }

    pub(crate) fn ok(self, method: &str, result: Value) -> Self {
        self.on(method, move |_| Ok(result.clone()))
    }

    pub(crate) fn push(&self, method: &str, reply: Result<Value, ProviderError>) {
        self.queued.lock().entry(method.to_string()).or_default().push_back(reply);
    }

    pub(crate) fn emit(&self, event: ProviderEvent) {
        let _ = self.events.send(event);
    }

    pub(crate) fn listeners(&self) -> usize {
        self.events.receiver_count()
    }

    pub(crate) fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl WalletProvider for MockProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        self.calls.lock().push((method.to_string(), params.clone()));
        if let Some(reply) = self.queued.lock().get_mut(method).and_then(VecDeque::pop_front) {
            return reply;
        }
        match self.standing.lock().get(method) {
            Some(reply) => reply(&params),
            None => Err(crate::error::ProviderRpcError::new(-32601, "Method not found").into()),
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent> {
        self.events.subscribe()
    }
}
