use crate::{
    error::{ProviderError, WalletError},
    provider::{EVENT_CHANNEL_CAPACITY, ProviderEvent, WalletProvider, WalletProviderExt},
    session::{Session, SessionEvent, SessionState},
    signer::WalletSigner,
    store::SessionStore,
};
use alloy_primitives::{Address, ChainId};
use nftm_common::AccountSource;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::{
    sync::broadcast::{self, error::RecvError},
    task::JoinHandle,
};

/// The single source of truth for which account is acting.
///
/// Cloning is cheap and every clone shares the same session. All session changes go through this
/// type: explicit calls ([`connect`](Self::connect), [`disconnect`](Self::disconnect), ...) and
/// wallet notifications delivered through [`listen`](Self::listen). Each change is persisted to
/// the configured [`SessionStore`] and published as a [`SessionEvent`].
#[derive(Clone, Debug)]
pub struct WalletSession {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    provider: Option<Arc<dyn WalletProvider>>,
    store: Option<Arc<dyn SessionStore>>,
    session: Mutex<Session>,
    /// Serializes writes to the store; never held together with `session`.
    persist: Mutex<()>,
    events: broadcast::Sender<SessionEvent>,
}

impl WalletSession {
    /// Creates an empty session. `None` means no wallet capability is available.
    pub fn new(provider: Option<Arc<dyn WalletProvider>>) -> Self {
        Self::with_store(provider, None)
    }

    /// Creates an empty session that persists its changes to `store`.
    ///
    /// The stored session is not loaded, see [`resume`](Self::resume).
    pub fn with_store(
        provider: Option<Arc<dyn WalletProvider>>,
        store: Option<Arc<dyn SessionStore>>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                provider,
                store,
                session: Mutex::new(Session::default()),
                persist: Mutex::new(()),
                events,
            }),
        }
    }

    /// Returns a snapshot of the current session.
    pub fn session(&self) -> Session {
        *self.inner.session.lock()
    }

    pub fn state(&self) -> SessionState {
        self.session().state()
    }

    pub fn account(&self) -> Option<Address> {
        self.session().account()
    }

    pub fn chain_id(&self) -> Option<ChainId> {
        self.session().chain_id()
    }

    pub fn is_connected(&self) -> bool {
        self.session().is_connected()
    }

    /// Whether a wallet capability was configured.
    pub fn has_wallet(&self) -> bool {
        self.inner.provider.is_some()
    }

    /// Subscribes to session changes.
    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    fn provider(&self) -> Result<&Arc<dyn WalletProvider>, WalletError> {
        self.inner.provider.as_ref().ok_or(WalletError::NoWalletCapability)
    }

    /// Loads the persisted session, e.g. the account selected in a previous run.
    ///
    /// Nothing is asked from the wallet; use [`restore`](Self::restore) to re-check it.
    pub fn resume(&self) -> Result<Session, WalletError> {
        let Some(store) = &self.inner.store else { return Ok(self.session()) };
        let stored = store.load()?;
        if stored.is_connected() {
            debug!(target: "wallets::session", session = %stored, "resumed persisted session");
            self.update(|_| Some((stored, SessionEvent::Connected(stored))));
        }
        Ok(self.session())
    }

    /// Requests account access from the wallet and connects its selected account.
    ///
    /// On failure the session is left unchanged.
    pub async fn connect(&self) -> Result<Session, WalletError> {
        let provider = self.provider()?;
        info!(target: "wallets::session", "requesting wallet account access");

        let accounts = match provider.request_accounts().await {
            Ok(accounts) => accounts,
            Err(ProviderError::Transport(err)) => {
                debug!(target: "wallets::session", %err, "wallet is unreachable");
                return Err(WalletError::NoWalletCapability);
            }
            Err(err) => {
                warn!(target: "wallets::session", %err, "wallet refused account access");
                return Err(err.into());
            }
        };
        let account = *accounts.first().ok_or(WalletError::NoAccounts)?;
        let chain_id = provider.chain_id().await?;

        let session = Session::connected(account, Some(chain_id));
        self.update(|_| Some((session, SessionEvent::Connected(session))));
        info!(target: "wallets::session", %session, "wallet connected");
        Ok(session)
    }

    /// Connects the fixed development account without involving the wallet.
    pub fn connect_test_account(&self) -> Session {
        let session = Session::test();
        self.update(|_| Some((session, SessionEvent::Connected(session))));
        info!(target: "wallets::session", %session, "test mode enabled");
        session
    }

    /// Silently re-attaches an account the wallet already authorized.
    ///
    /// Never prompts the user. If the wallet authorizes no account the session is cleared; a
    /// failing wallet is logged and leaves the session untouched.
    pub async fn restore(&self) -> Option<Session> {
        let provider = self.inner.provider.as_ref()?;
        let found = async {
            let accounts = provider.accounts().await?;
            let Some(&account) = accounts.first() else { return Ok(None) };
            let chain_id = provider.chain_id().await?;
            Ok::<_, ProviderError>(Some(Session::connected(account, Some(chain_id))))
        }
        .await;

        match found {
            Ok(Some(session)) => {
                self.update(|_| Some((session, SessionEvent::Connected(session))));
                Some(session)
            }
            Ok(None) => {
                self.apply_accounts(&[], None);
                None
            }
            Err(err) => {
                warn!(target: "wallets::session", %err, "failed to check the wallet connection");
                None
            }
        }
    }

    /// Clears the session. Calling it on an empty session does nothing.
    pub fn disconnect(&self) {
        let changed = self.update(|current| {
            current.is_connected().then_some((Session::default(), SessionEvent::Disconnected))
        });
        if changed {
            info!(target: "wallets::session", "wallet disconnected");
        }
    }

    /// Asks the wallet to switch to `chain_id`.
    ///
    /// Fails with [`WalletError::UnknownNetwork`] if the wallet doesn't know the chain, in which
    /// case the caller may offer to add it.
    pub async fn switch_network(&self, chain_id: ChainId) -> Result<(), WalletError> {
        let provider = self.provider()?;
        match provider.switch_chain(chain_id).await {
            Ok(()) => {
                self.apply(ProviderEvent::ChainChanged(chain_id));
                Ok(())
            }
            Err(err) if err.as_rpc_error().is_some_and(|err| err.is_unrecognized_chain()) => {
                Err(WalletError::UnknownNetwork(chain_id))
            }
            Err(source) => Err(WalletError::SwitchFailed { chain_id, source }),
        }
    }

    /// Applies a wallet notification to the session and returns the resulting change, if any.
    ///
    /// An empty account list disconnects; otherwise the first account becomes the session
    /// account. A chain change updates the chain of a connected session.
    pub fn apply(&self, event: ProviderEvent) -> Option<SessionEvent> {
        match event {
            ProviderEvent::AccountsChanged(accounts) => self.apply_accounts(&accounts, None),
            ProviderEvent::ChainChanged(chain_id) => self.apply_chain(chain_id),
        }
    }

    fn apply_accounts(
        &self,
        accounts: &[Address],
        chain_hint: Option<ChainId>,
    ) -> Option<SessionEvent> {
        let mut published = None;
        self.update(|current| {
            let event = match (accounts.first(), current.state()) {
                (None, SessionState::Disconnected) => return None,
                (None, _) => SessionEvent::Disconnected,
                (Some(&account), SessionState::Connected) => {
                    let previous = current.account()?;
                    if previous == account {
                        return None;
                    }
                    SessionEvent::AccountChanged { previous, current: account }
                }
                (Some(&account), _) => {
                    SessionEvent::Connected(Session::connected(account, chain_hint))
                }
            };
            let next = match (event, accounts.first()) {
                (SessionEvent::Connected(session), _) => session,
                (_, Some(&account)) => {
                    Session::connected(account, current.chain_id().or(chain_hint))
                }
                (_, None) => Session::default(),
            };
            published = Some(event);
            Some((next, event))
        });
        published
    }

    fn apply_chain(&self, chain_id: ChainId) -> Option<SessionEvent> {
        let mut published = None;
        self.update(|current| {
            if !current.is_connected() || current.chain_id() == Some(chain_id) {
                return None;
            }
            let event = SessionEvent::ChainChanged { chain_id };
            published = Some(event);
            Some((current.with_chain_id(chain_id), event))
        });
        published
    }

    /// Writes the current session to the store.
    ///
    /// The snapshot is taken under the store lock, so concurrent updates leave the latest session
    /// on disk.
    fn persist(&self) {
        let Some(store) = &self.inner.store else { return };
        let _guard = self.inner.persist.lock();
        let current = self.session();
        let persisted = if current.is_connected() { store.save(&current) } else { store.clear() };
        if let Err(err) = persisted {
            warn!(target: "wallets::session", %err, "failed to persist the session");
        }
    }

    /// Replaces the session with the one produced by `f`, then persists and publishes it.
    ///
    /// Returns whether the session changed.
    fn update(&self, f: impl FnOnce(Session) -> Option<(Session, SessionEvent)>) -> bool {
        let mut session = self.inner.session.lock();
        let Some((next, event)) = f(*session) else { return false };
        *session = next;
        drop(session);

        self.persist();

        trace!(target: "wallets::session", ?event, "session changed");
        let _ = self.inner.events.send(event);
        true
    }

    /// Starts following the wallet's account and chain notifications.
    ///
    /// Must be called from within a tokio runtime. The listener stays registered until the
    /// returned [`Subscription`] is dropped.
    pub fn listen(&self) -> Result<Subscription, WalletError> {
        let provider = self.provider()?.clone();
        let mut notifications = provider.subscribe();
        let holder = self.clone();
        let handle = tokio::spawn(async move {
            loop {
                match notifications.recv().await {
                    Ok(event) => holder.on_notification(provider.as_ref(), event).await,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(target: "wallets::session", skipped, "missed wallet notifications");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            debug!(target: "wallets::session", "wallet notifications closed");
        });
        Ok(Subscription { handle })
    }

    async fn on_notification(&self, provider: &dyn WalletProvider, event: ProviderEvent) {
        let change = match event {
            // A newly reported account needs its chain; the wallet only pushes chain changes.
            ProviderEvent::AccountsChanged(accounts)
                if !accounts.is_empty() && self.state() != SessionState::Connected =>
            {
                let chain_id = match provider.chain_id().await {
                    Ok(chain_id) => Some(chain_id),
                    Err(err) => {
                        debug!(target: "wallets::session", %err, "failed to fetch chain id");
                        None
                    }
                };
                self.apply_accounts(&accounts, chain_id)
            }
            event => self.apply(event),
        };
        if let Some(change) = change {
            debug!(target: "wallets::session", ?change, "applied wallet notification");
        }
    }

    /// Returns a signer for the connected wallet account.
    ///
    /// Test sessions don't have one: their account is not controlled by the wallet.
    pub fn signer(&self) -> Result<WalletSigner, WalletError> {
        let provider = self.provider()?;
        let session = self.session();
        match (session.state(), session.account()) {
            (SessionState::Connected, Some(account)) => {
                Ok(WalletSigner::new(provider.clone(), account, session.chain_id()))
            }
            _ => Err(WalletError::NotConnected),
        }
    }
}

impl AccountSource for WalletSession {
    fn current_account(&self) -> Option<Address> {
        self.account()
    }
}

/// A registered wallet notification listener. Dropping it removes the listener.
#[derive(Debug)]
#[must_use = "the listener is removed when the subscription is dropped"]
pub struct Subscription {
    handle: JoinHandle<()>,
}

impl Subscription {
    /// Whether the listener is still running.
    pub fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Removes the listener.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
