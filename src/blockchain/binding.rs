use anyhow::Result;
use async_trait::async_trait;
use ethers::types::{Address, TxHash, U256};

/// A roster record as the contract stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub name: String,
    pub enrollment: U256,
}

impl Student {
    pub fn new(name: impl Into<String>, enrollment: impl Into<U256>) -> Self {
        Self {
            name: name.into(),
            enrollment: enrollment.into(),
        }
    }
}

/// Query side of the roster contract. Needs no signer.
#[async_trait]
pub trait RosterReader: Send + Sync {
    async fn owner(&self) -> Result<Address>;

    async fn is_admin(&self, address: Address) -> Result<bool>;

    async fn student_count(&self) -> Result<u64>;

    /// Student stored under the 1-based `position`
    async fn student(&self, position: u64) -> Result<Student>;
}

/// Mutating side of the roster contract, bound to one signing account.
///
/// Every call resolves once the transaction is mined. A transaction that is
/// dropped or reverted is an error.
#[async_trait]
pub trait RosterWriter: Send + Sync {
    fn account(&self) -> Address;

    async fn add_admin(&self, address: Address) -> Result<TxHash>;

    async fn delete_admin(&self, address: Address) -> Result<TxHash>;

    async fn add_student(&self, name: &str, enrollment: U256) -> Result<TxHash>;

    async fn delete_student(&self, position: u64) -> Result<TxHash>;
}
