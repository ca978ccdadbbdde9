use anyhow::{Context, Result};
use std::sync::Arc;

use crate::blockchain::{KeystoreWallet, WalletProvider};
use crate::config::Config;
use crate::error::SessionError;
use crate::roster::{ActionPhase, RosterService, StatusMessage};
use crate::session::SessionManager;
use crate::state::AppState;

/// Connect both bindings, start following wallet account changes and load the roster
pub async fn initialize_state(config: &Config) -> Result<AppState> {
    let wallet = KeystoreWallet::from_config(config)
        .context("Failed to load wallet keys")?
        .map(|wallet| Arc::new(wallet) as Arc<dyn WalletProvider>);

    let session = Arc::new(SessionManager::new(wallet));
    let roster = Arc::new(RosterService::new(Arc::clone(&session)));

    session.connect_read(config);

    match session.connect_write().await {
        Ok(_) => {}
        Err(e @ SessionError::WalletUnavailable) => {
            roster.notify(StatusMessage::new(ActionPhase::Failed, e.to_string()));
        }
        Err(e) => tracing::error!("Error connecting wallet: {e}"),
    }

    if session.spawn_account_listener().is_some() {
        tracing::info!("Listening for wallet account changes");
    }

    roster.fetch_students().await;

    Ok(AppState::new(roster))
}
