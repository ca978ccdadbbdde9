use crate::blockchain::binding::{RosterReader, RosterWriter, Student};
use crate::blockchain::contract::StudentRoster;
use anyhow::{Context, Result};
use async_trait::async_trait;
use ethers::contract::builders::ContractCall;
use ethers::prelude::*;
use ethers::providers::{Http, Provider};
use ethers::signers::{LocalWallet, Signer};
use std::sync::Arc;

type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Read-only handle routed through the hosted provider
#[derive(Clone, Debug)]
pub struct ReadBinding {
    contract: StudentRoster<Provider<Http>>,
}

impl ReadBinding {
    pub fn connect(rpc_url: &str, contract_address: &str) -> Result<Self> {
        let provider =
            Provider::<Http>::try_from(rpc_url).context("Failed to create read provider")?;

        let contract_address: Address = contract_address
            .parse()
            .context("Failed to parse contract address")?;

        let contract = StudentRoster::new(contract_address, Arc::new(provider));

        Ok(Self { contract })
    }
}

#[async_trait]
impl RosterReader for ReadBinding {
    async fn owner(&self) -> Result<Address> {
        self.contract
            .owner()
            .call()
            .await
            .context("Failed to get owner")
    }

    async fn is_admin(&self, address: Address) -> Result<bool> {
        self.contract
            .admins(address)
            .call()
            .await
            .context("Failed to check admin")
    }

    async fn student_count(&self) -> Result<u64> {
        let count = self
            .contract
            .student_count()
            .call()
            .await
            .context("Failed to get student count")?;

        if count > U256::from(u64::MAX) {
            anyhow::bail!("Student count {count} overflows u64");
        }

        Ok(count.as_u64())
    }

    async fn student(&self, position: u64) -> Result<Student> {
        let (name, enrollment) = self
            .contract
            .students(U256::from(position))
            .call()
            .await
            .with_context(|| format!("Failed to get student {position}"))?;

        Ok(Student { name, enrollment })
    }
}

/// Signing handle; every transaction is sent from `account`
#[derive(Clone, Debug)]
pub struct WriteBinding {
    account: Address,
    confirmations: usize,
    contract: StudentRoster<SignerClient>,
}

impl WriteBinding {
    pub async fn connect(
        rpc_url: &str,
        contract_address: &str,
        wallet: LocalWallet,
        confirmations: usize,
    ) -> Result<Self> {
        let provider =
            Provider::<Http>::try_from(rpc_url).context("Failed to create wallet provider")?;

        let chain_id = provider
            .get_chainid()
            .await
            .context("Failed to query chain id")?;
        let wallet = wallet.with_chain_id(chain_id.as_u64());
        let account = wallet.address();

        let client = Arc::new(SignerMiddleware::new(provider, wallet));

        let contract_address: Address = contract_address
            .parse()
            .context("Failed to parse contract address")?;

        let contract = StudentRoster::new(contract_address, client);

        Ok(Self {
            account,
            confirmations,
            contract,
        })
    }

    async fn submit(&self, call: ContractCall<SignerClient, ()>, what: &str) -> Result<TxHash> {
        let receipt = call
            .send()
            .await
            .with_context(|| format!("Failed to send {what} transaction"))?
            .confirmations(self.confirmations)
            .await
            .context("Failed to wait for transaction confirmation")?
            .ok_or_else(|| anyhow::anyhow!("Transaction receipt not found"))?;

        if receipt.status == Some(U64::zero()) {
            anyhow::bail!(
                "{what} transaction {:?} reverted",
                receipt.transaction_hash
            );
        }

        tracing::debug!(
            tx = ?receipt.transaction_hash,
            block = ?receipt.block_number,
            "{what} transaction mined"
        );

        Ok(receipt.transaction_hash)
    }
}

#[async_trait]
impl RosterWriter for WriteBinding {
    fn account(&self) -> Address {
        self.account
    }

    async fn add_admin(&self, address: Address) -> Result<TxHash> {
        self.submit(self.contract.add_admin(address), "add admin")
            .await
    }

    async fn delete_admin(&self, address: Address) -> Result<TxHash> {
        self.submit(self.contract.delete_admin(address), "delete admin")
            .await
    }

    async fn add_student(&self, name: &str, enrollment: U256) -> Result<TxHash> {
        self.submit(
            self.contract.add_student(name.to_string(), enrollment),
            "add student",
        )
        .await
    }

    async fn delete_student(&self, position: u64) -> Result<TxHash> {
        self.submit(
            self.contract.delete_student(U256::from(position)),
            "delete student",
        )
        .await
    }
}
