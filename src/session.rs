//! Connection manager for the two contract bindings.
//!
//! The current [`Session`] is an immutable snapshot published through a
//! `watch` channel. Connecting or switching accounts builds a new snapshot and
//! replaces the old one wholesale.

use crate::blockchain::{
    ReadBinding, RosterReader, RosterWriter, WalletProvider, format_address,
};
use crate::config::Config;
use crate::error::SessionError;
use ethers::types::Address;
use std::fmt;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;

#[derive(Clone, Default)]
pub struct Session {
    pub connected_account: Option<Address>,
    pub reader: Option<Arc<dyn RosterReader>>,
    pub writer: Option<Arc<dyn RosterWriter>>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("connected_account", &self.connected_account)
            .field("reader", &self.reader.is_some())
            .field("writer", &self.writer.is_some())
            .finish()
    }
}

pub struct SessionManager {
    wallet: Option<Arc<dyn WalletProvider>>,
    state: watch::Sender<Arc<Session>>,
    // held from reading the wallet accounts until the new session is published
    connecting: Mutex<()>,
}

impl SessionManager {
    pub fn new(wallet: Option<Arc<dyn WalletProvider>>) -> Self {
        let (state, _) = watch::channel(Arc::new(Session::default()));
        Self {
            wallet,
            state,
            connecting: Mutex::new(()),
        }
    }

    pub fn wallet(&self) -> Option<&Arc<dyn WalletProvider>> {
        self.wallet.as_ref()
    }

    pub fn snapshot(&self) -> Arc<Session> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Session>> {
        self.state.subscribe()
    }

    /// Build the read binding against the hosted provider.
    ///
    /// Failures are only logged; reads then report the binding as missing.
    pub fn connect_read(&self, config: &Config) {
        match ReadBinding::connect(&config.read_provider_url, &config.contract_address) {
            Ok(binding) => self.install_reader(Arc::new(binding)),
            Err(e) => tracing::error!("Error creating read contract: {e:#}"),
        }
    }

    pub fn install_reader(&self, reader: Arc<dyn RosterReader>) {
        self.state.send_modify(|session| {
            *session = Arc::new(Session {
                reader: Some(reader),
                ..Session::clone(session)
            });
        });
    }

    /// Request account access from the wallet and rebuild the write side.
    ///
    /// Returns the newly active account, `None` if the wallet exposed none.
    /// Concurrent calls run one after another, so the last one to start
    /// publishes the wallet's latest account.
    pub async fn connect_write(&self) -> Result<Option<Address>, SessionError> {
        let Some(wallet) = &self.wallet else {
            tracing::warn!("No wallet available, please install a wallet");
            return Err(SessionError::WalletUnavailable);
        };
        let _connecting = self.connecting.lock().await;

        let accounts = wallet
            .request_accounts()
            .await
            .map_err(SessionError::AccountAccess)?;

        let (account, writer) = match accounts.first().copied() {
            Some(account) => {
                let writer = wallet
                    .write_binding(account)
                    .await
                    .map_err(SessionError::WriteBinding)?;
                (Some(account), Some(writer))
            }
            None => (None, None),
        };

        self.state.send_modify(|session| {
            *session = Arc::new(Session {
                connected_account: account,
                reader: session.reader.clone(),
                writer,
            });
        });

        match account {
            Some(account) => {
                tracing::info!(account = %format_address(&account), "Wallet connected")
            }
            None => tracing::warn!("Wallet exposed no accounts"),
        }

        Ok(account)
    }

    /// Re-run [`connect_write`](Self::connect_write) on every wallet account change.
    pub fn spawn_account_listener(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        let mut changes = self.wallet.as_ref()?.subscribe();
        let manager = Arc::clone(self);

        Some(tokio::spawn(async move {
            while changes.changed().await.is_ok() {
                if let Err(e) = manager.connect_write().await {
                    tracing::error!("Error reconnecting after account change: {e}");
                }
            }
        }))
    }
}
