use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Please install a wallet!")]
    WalletUnavailable,

    #[error("Wallet refused account access: {0:#}")]
    AccountAccess(anyhow::Error),

    #[error("Failed to build write binding: {0:#}")]
    WriteBinding(anyhow::Error),
}
