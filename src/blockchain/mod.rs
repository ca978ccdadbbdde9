pub mod binding;
pub mod contract;
pub mod helpers;
pub mod service;
pub mod wallet;

pub use binding::{RosterReader, RosterWriter, Student};
pub use helpers::{format_address, parse_address, parse_enrollment};
pub use service::{ReadBinding, WriteBinding};
pub use wallet::{KeystoreWallet, WalletProvider};
