//! Advisory pre-flight checks.
//!
//! These only decide whether a transaction is worth attempting. The contract
//! enforces the same rules when the transaction is mined.

use crate::blockchain::{RosterReader, format_address};
use ethers::types::Address;
use std::sync::Arc;

pub struct AuthorizationGate {
    reader: Option<Arc<dyn RosterReader>>,
}

impl AuthorizationGate {
    pub fn new(reader: Option<Arc<dyn RosterReader>>) -> Self {
        Self { reader }
    }

    /// `None` when there is no read binding or the query failed
    pub async fn get_owner(&self) -> Option<Address> {
        let reader = self.reader.as_ref()?;
        match reader.owner().await {
            Ok(owner) => Some(owner),
            Err(e) => {
                tracing::error!("Error getting owner: {e:#}");
                None
            }
        }
    }

    pub async fn is_admin(&self, address: Address) -> Option<bool> {
        let reader = self.reader.as_ref()?;
        match reader.is_admin(address).await {
            Ok(is_admin) => Some(is_admin),
            Err(e) => {
                tracing::error!(address = %format_address(&address), "Error checking admin: {e:#}");
                None
            }
        }
    }
}
