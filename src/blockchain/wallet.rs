use crate::blockchain::binding::RosterWriter;
use crate::blockchain::helpers::format_address;
use crate::blockchain::service::WriteBinding;
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use ethers::signers::{LocalWallet, Signer};
use ethers::types::Address;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;

/// Account access and transaction signing, as a browser wallet extension offers them.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask for account access. The first entry is the active account.
    async fn request_accounts(&self) -> Result<Vec<Address>>;

    /// Write binding whose transactions are signed by `account`
    async fn write_binding(&self, account: Address) -> Result<Arc<dyn RosterWriter>>;

    /// Make `account` the active one and notify subscribers
    fn select_account(&self, account: Address) -> Result<()>;

    /// Fires whenever the active account changes
    fn subscribe(&self) -> watch::Receiver<Vec<Address>>;
}

/// Wallet backed by private keys loaded from configuration
pub struct KeystoreWallet {
    rpc_url: String,
    contract_address: String,
    confirmations: usize,
    signers: HashMap<Address, LocalWallet>,
    accounts: watch::Sender<Vec<Address>>,
}

impl KeystoreWallet {
    /// Returns `None` when no key is configured, i.e. there is no wallet at all
    pub fn from_config(config: &Config) -> Result<Option<Self>> {
        if !config.has_wallet() {
            return Ok(None);
        }

        let keys: Vec<&str> = config
            .wallet_private_keys
            .iter()
            .map(|key| key.trim())
            .filter(|key| !key.is_empty())
            .collect();

        let mut order = Vec::with_capacity(keys.len());
        let mut signers = HashMap::with_capacity(keys.len());
        for key in keys {
            let wallet: LocalWallet = key.parse().context("Failed to parse private key")?;
            let address = wallet.address();
            if signers.insert(address, wallet).is_none() {
                order.push(address);
            }
        }

        let (accounts, _) = watch::channel(order);

        Ok(Some(Self {
            rpc_url: config.wallet_rpc_url().to_string(),
            contract_address: config.contract_address.clone(),
            confirmations: config.confirmations,
            signers,
            accounts,
        }))
    }
}

#[async_trait]
impl WalletProvider for KeystoreWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>> {
        Ok(self.accounts.borrow().clone())
    }

    async fn write_binding(&self, account: Address) -> Result<Arc<dyn RosterWriter>> {
        let wallet = self
            .signers
            .get(&account)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Account {} is not in the wallet", format_address(&account)))?;

        let binding =
            WriteBinding::connect(&self.rpc_url, &self.contract_address, wallet, self.confirmations)
                .await?;

        Ok(Arc::new(binding))
    }

    fn select_account(&self, account: Address) -> Result<()> {
        if !self.signers.contains_key(&account) {
            anyhow::bail!("Account {} is not in the wallet", format_address(&account));
        }

        self.accounts.send_modify(|order| {
            order.retain(|address| *address != account);
            order.insert(0, account);
        });
        tracing::info!(account = %format_address(&account), "Wallet active account changed");

        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Vec<Address>> {
        self.accounts.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    // Well-known development keys, never funded outside local chains
    const KEY_A: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const KEY_B: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

    fn config(keys: &str) -> Config {
        Config::try_parse_from([
            "roster_service",
            "--read-provider-url",
            "http://localhost:8545",
            "--contract-address",
            "0x5FbDB2315678afecb367f032d93F642f64180aa3",
            "--wallet-private-keys",
            keys,
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn no_keys_means_no_wallet() {
        let wallet = KeystoreWallet::from_config(&config("")).unwrap();
        assert!(wallet.is_none());
    }

    #[tokio::test]
    async fn first_key_is_active_account() {
        let wallet = KeystoreWallet::from_config(&config(&format!("{KEY_A},{KEY_B}")))
            .unwrap()
            .unwrap();

        let accounts = wallet.request_accounts().await.unwrap();
        let expected: Address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse().unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0], expected);
    }

    #[tokio::test]
    async fn selecting_an_account_notifies_subscribers() {
        let wallet = KeystoreWallet::from_config(&config(&format!("{KEY_A},{KEY_B}")))
            .unwrap()
            .unwrap();
        let mut rx = wallet.subscribe();
        let second = wallet.request_accounts().await.unwrap()[1];

        wallet.select_account(second).unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update()[0], second);
        assert_eq!(wallet.request_accounts().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_account_cannot_be_selected() {
        let wallet = KeystoreWallet::from_config(&config(KEY_A)).unwrap().unwrap();
        let stranger: Address = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8".parse().unwrap();

        assert!(wallet.select_account(stranger).is_err());
    }
}
