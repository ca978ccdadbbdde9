//! In-memory stand-ins for the contract and the wallet.
//!
//! `FakeChain` enforces the same access rules as the deployed contract, so a
//! transaction that slips past the advisory checks is still refused here.

#![allow(dead_code)]

use anyhow::{Result, bail};
use async_trait::async_trait;
use ethers::types::{Address, TxHash, U256};
use roster_service::blockchain::{RosterReader, RosterWriter, Student, WalletProvider};
use roster_service::roster::RosterService;
use roster_service::session::SessionManager;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;

pub fn addr(n: u64) -> Address {
    Address::from_low_u64_be(n)
}

pub fn hex(address: Address) -> String {
    format!("{address:?}")
}

#[derive(Default)]
struct ChainState {
    owner: Address,
    admins: HashSet<Address>,
    students: Vec<Student>,
    fail_reads: bool,
    revert_all: bool,
    submitted: usize,
    mined: u64,
}

#[derive(Clone)]
pub struct FakeChain {
    state: Arc<Mutex<ChainState>>,
}

impl FakeChain {
    pub fn new(owner: Address) -> Self {
        let state = ChainState {
            owner,
            ..ChainState::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn with_admin(self, admin: Address) -> Self {
        self.state.lock().unwrap().admins.insert(admin);
        self
    }

    pub fn with_student(self, name: &str, enrollment: u64) -> Self {
        self.state
            .lock()
            .unwrap()
            .students
            .push(Student::new(name, enrollment));
        self
    }

    pub fn has_admin(&self, address: Address) -> bool {
        self.state.lock().unwrap().admins.contains(&address)
    }

    pub fn admin_count(&self) -> usize {
        self.state.lock().unwrap().admins.len()
    }

    pub fn students(&self) -> Vec<Student> {
        self.state.lock().unwrap().students.clone()
    }

    /// Every transaction that reached the chain, mined or reverted
    pub fn submitted(&self) -> usize {
        self.state.lock().unwrap().submitted
    }

    pub fn fail_reads(&self, fail: bool) {
        self.state.lock().unwrap().fail_reads = fail;
    }

    pub fn revert_all(&self, revert: bool) {
        self.state.lock().unwrap().revert_all = revert;
    }

    pub fn signer(&self, account: Address) -> FakeSigner {
        FakeSigner {
            chain: self.clone(),
            account,
        }
    }

    fn read<T>(&self, f: impl FnOnce(&ChainState) -> T) -> Result<T> {
        let state = self.state.lock().unwrap();
        if state.fail_reads {
            bail!("node unavailable");
        }
        Ok(f(&*state))
    }

    fn transact(
        &self,
        from: Address,
        f: impl FnOnce(&mut ChainState, Address) -> Result<()>,
    ) -> Result<TxHash> {
        let mut state = self.state.lock().unwrap();
        state.submitted += 1;
        if state.revert_all {
            bail!("execution reverted");
        }
        f(&mut *state, from)?;
        state.mined += 1;
        Ok(TxHash::from_low_u64_be(state.mined))
    }
}

#[async_trait]
impl RosterReader for FakeChain {
    async fn owner(&self) -> Result<Address> {
        self.read(|state| state.owner)
    }

    async fn is_admin(&self, address: Address) -> Result<bool> {
        self.read(|state| state.admins.contains(&address))
    }

    async fn student_count(&self) -> Result<u64> {
        self.read(|state| state.students.len() as u64)
    }

    async fn student(&self, position: u64) -> Result<Student> {
        self.read(|state| {
            position
                .checked_sub(1)
                .and_then(|index| state.students.get(index as usize))
                .cloned()
        })?
        .ok_or_else(|| anyhow::anyhow!("execution reverted: no student at {position}"))
    }
}

pub struct FakeSigner {
    chain: FakeChain,
    account: Address,
}

fn only_owner(state: &ChainState, from: Address) -> Result<()> {
    if state.owner != from {
        bail!("execution reverted: only owner");
    }
    Ok(())
}

fn only_admin(state: &ChainState, from: Address) -> Result<()> {
    if !state.admins.contains(&from) {
        bail!("execution reverted: only admin");
    }
    Ok(())
}

#[async_trait]
impl RosterWriter for FakeSigner {
    fn account(&self) -> Address {
        self.account
    }

    async fn add_admin(&self, address: Address) -> Result<TxHash> {
        self.chain.transact(self.account, |state, from| {
            only_owner(state, from)?;
            state.admins.insert(address);
            Ok(())
        })
    }

    async fn delete_admin(&self, address: Address) -> Result<TxHash> {
        self.chain.transact(self.account, |state, from| {
            only_owner(state, from)?;
            if address == state.owner {
                bail!("execution reverted: owner");
            }
            state.admins.remove(&address);
            Ok(())
        })
    }

    async fn add_student(&self, name: &str, enrollment: U256) -> Result<TxHash> {
        let student = Student {
            name: name.to_string(),
            enrollment,
        };
        self.chain.transact(self.account, |state, from| {
            only_admin(state, from)?;
            state.students.push(student);
            Ok(())
        })
    }

    async fn delete_student(&self, position: u64) -> Result<TxHash> {
        self.chain.transact(self.account, |state, from| {
            only_admin(state, from)?;
            if position == 0 || position as usize > state.students.len() {
                bail!("execution reverted: bad index");
            }
            state.students.remove(position as usize - 1);
            Ok(())
        })
    }
}

pub struct FakeWallet {
    chain: FakeChain,
    accounts: watch::Sender<Vec<Address>>,
    slow_account: Mutex<Option<(Address, Duration)>>,
}

impl FakeWallet {
    pub fn new(chain: &FakeChain, accounts: &[Address]) -> Self {
        let (accounts, _) = watch::channel(accounts.to_vec());
        Self {
            chain: chain.clone(),
            accounts,
            slow_account: Mutex::new(None),
        }
    }

    /// Building a signer for `account` takes `delay` from now on
    pub fn delay_binding(&self, account: Address, delay: Duration) {
        *self.slow_account.lock().unwrap() = Some((account, delay));
    }
}

#[async_trait]
impl WalletProvider for FakeWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>> {
        Ok(self.accounts.borrow().clone())
    }

    async fn write_binding(&self, account: Address) -> Result<Arc<dyn RosterWriter>> {
        let slow = *self.slow_account.lock().unwrap();
        if let Some((_, delay)) = slow.filter(|(slow, _)| *slow == account) {
            tokio::time::sleep(delay).await;
        }
        Ok(Arc::new(self.chain.signer(account)))
    }

    fn select_account(&self, account: Address) -> Result<()> {
        self.accounts.send_modify(|order| {
            order.retain(|address| *address != account);
            order.insert(0, account);
        });
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Vec<Address>> {
        self.accounts.subscribe()
    }
}

pub struct Harness {
    pub chain: FakeChain,
    pub wallet: Arc<FakeWallet>,
    pub session: Arc<SessionManager>,
    pub roster: Arc<RosterService>,
}

impl Harness {
    /// Session with both bindings connected; `accounts[0]` is the active account
    pub async fn connected(chain: &FakeChain, accounts: &[Address]) -> Self {
        let wallet = Arc::new(FakeWallet::new(chain, accounts));
        let session = Arc::new(SessionManager::new(Some(
            Arc::clone(&wallet) as Arc<dyn WalletProvider>
        )));
        session.install_reader(Arc::new(chain.clone()));
        session.connect_write().await.unwrap();

        let roster = Arc::new(RosterService::new(Arc::clone(&session)));

        Self {
            chain: chain.clone(),
            wallet,
            session,
            roster,
        }
    }

    /// Switch the active account and reconnect, as the account listener would
    pub async fn switch_to(&self, account: Address) {
        self.wallet.select_account(account).unwrap();
        self.session.connect_write().await.unwrap();
    }
}
