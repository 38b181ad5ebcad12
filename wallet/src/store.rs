//! The wallet session store.
//!
//! Holds the connected account and its two balances, and refreshes the
//! balances through an injected [`ChainReader`]. Refresh is best-effort:
//! every failure inside [`WalletStore::update_balances`] is logged and
//! swallowed, never surfaced to the caller. For a UI-facing session,
//! stale balances beat a crashed refresh.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use satchel_provider::{ChainReader, EthClient, HttpTransport};
use satchel_types::{BnbAmount, TokenAmount};

use crate::config::WalletConfig;
use crate::error::WalletError;
use crate::state::WalletState;

/// Shared handle to the wallet session.
///
/// Clones share the same underlying state. The interior lock is held only
/// for individual field reads and writes, never across an await, which
/// preserves the event-loop semantics of the session this models:
/// concurrent refreshes interleave per field (last write wins), and a
/// [`disconnect`](Self::disconnect) during an in-flight refresh does not
/// cancel it, so a late response may overwrite the reset fields.
#[derive(Clone)]
pub struct WalletStore {
    state: Arc<RwLock<WalletState>>,
    reader: Arc<dyn ChainReader>,
    config: Arc<WalletConfig>,
}

impl WalletStore {
    /// Create a store over the given chain reader.
    pub fn new(reader: Arc<dyn ChainReader>, config: WalletConfig) -> Self {
        Self {
            state: Arc::new(RwLock::new(WalletState::default())),
            reader,
            config: Arc::new(config),
        }
    }

    /// Create a store wired to the HTTP JSON-RPC endpoint from the config.
    pub fn from_config(config: WalletConfig) -> Result<Self, WalletError> {
        let transport = HttpTransport::new(config.rpc_url.as_str())?;
        let reader = EthClient::new(Arc::new(transport));
        Ok(Self::new(Arc::new(reader), config))
    }

    // ── Read accessors ──────────────────────────────────────────────────

    /// Snapshot of the current session state.
    pub fn state(&self) -> WalletState {
        self.read().clone()
    }

    /// Currently connected account, if any.
    pub fn address(&self) -> Option<String> {
        self.read().address.clone()
    }

    /// Whether a wallet session is active.
    pub fn is_connected(&self) -> bool {
        self.read().is_connected
    }

    /// Last fetched native-coin balance.
    pub fn bnb_balance(&self) -> BnbAmount {
        self.read().bnb_balance
    }

    /// Last fetched token balance.
    pub fn token_balance(&self) -> TokenAmount {
        self.read().token_balance
    }

    /// Handle to the injected chain reader.
    pub fn reader(&self) -> Arc<dyn ChainReader> {
        Arc::clone(&self.reader)
    }

    /// The store's configuration.
    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    // ── Operations ──────────────────────────────────────────────────────

    /// Set the account address. No validation, no side effects.
    pub fn set_address(&self, address: impl Into<String>) {
        self.write().address = Some(address.into());
    }

    /// Mark the session connected and kick off a balance refresh.
    ///
    /// The flag is set before this call returns; the refresh runs as a
    /// detached task, so refresh failures never reach the caller (they are
    /// logged inside [`update_balances`](Self::update_balances)).
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn connect(&self) {
        self.write().is_connected = true;

        let store = self.clone();
        tokio::spawn(async move {
            store.update_balances().await;
        });
    }

    /// Reset the session to the disconnected defaults.
    ///
    /// Synchronous; performs no network calls. An in-flight refresh is not
    /// cancelled; see the type-level docs for the resulting race.
    pub fn disconnect(&self) {
        self.write().reset();
    }

    /// Refresh both balances from the chain.
    ///
    /// No-op when no address is set (no provider calls at all). All
    /// failures are logged and swallowed; a failure between the two reads
    /// leaves the first write in place, because the two balance fields are
    /// not updated transactionally.
    pub async fn update_balances(&self) {
        if let Err(e) = self.refresh_balances().await {
            tracing::error!(error = %e, "balance refresh failed");
        }
    }

    async fn refresh_balances(&self) -> Result<(), WalletError> {
        let Some(address) = self.address() else {
            return Ok(());
        };

        self.check_network().await?;

        let bnb = self.reader.native_balance(&address).await?;
        self.write().bnb_balance = BnbAmount::new(bnb);
        tracing::debug!(address = %address, balance = %bnb, "native balance updated");

        let token = self
            .reader
            .token_balance(self.config.token_address, &address)
            .await?;
        self.write().token_balance = TokenAmount::new(token);
        tracing::debug!(address = %address, balance = %token, "token balance updated");

        Ok(())
    }

    /// Best-effort guard: right network, token contract actually deployed.
    ///
    /// Runs before either balance write, so a failed check leaves both
    /// fields untouched. Not atomic with the reads that follow (the
    /// network could change in between); the window is accepted.
    async fn check_network(&self) -> Result<(), WalletError> {
        if let Some(expected) = self.config.expected_chain_id {
            let actual = self.reader.chain_id().await?;
            if actual != expected {
                return Err(WalletError::WrongNetwork { expected, actual });
            }
        }

        if self.config.require_token_code {
            let code = self.reader.code_at(self.config.token_address).await?;
            if code.is_empty() {
                return Err(WalletError::NoContract(self.config.token_address));
            }
        }

        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, WalletState> {
        self.state.read().expect("wallet state lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, WalletState> {
        self.state.write().expect("wallet state lock poisoned")
    }
}
