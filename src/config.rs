use clap::Parser;
use once_cell::sync::Lazy;

pub static APP_CONFIG: Lazy<Config> = Lazy::new(Config::parse);

#[derive(Debug, Parser, Clone)]
pub struct Config {
    #[clap(long, env, default_value_t = 8080)]
    pub port: u16,

    #[clap(long, env, default_value_t = true)]
    pub swagger_enabled: bool,

    #[clap(long, env, default_value = "info")]
    pub log_level: String,

    /// Hosted node endpoint used for every read that needs no signature
    #[clap(long, env)]
    pub read_provider_url: String,

    #[clap(long, env)]
    pub contract_address: String,

    /// Endpoint the wallet submits transactions through, falls back to the read provider
    #[clap(long, env)]
    pub wallet_rpc_url: Option<String>,

    /// Comma-separated private keys; the first one is the active account
    #[clap(long, env, value_delimiter = ',')]
    pub wallet_private_keys: Vec<String>,

    #[clap(long, env, default_value_t = 1)]
    pub confirmations: usize,
}

impl Config {
    pub fn wallet_rpc_url(&self) -> &str {
        self.wallet_rpc_url
            .as_deref()
            .unwrap_or(&self.read_provider_url)
    }

    pub fn has_wallet(&self) -> bool {
        self.wallet_private_keys.iter().any(|key| !key.trim().is_empty())
    }
}
