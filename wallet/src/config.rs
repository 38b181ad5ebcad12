//! Store configuration with TOML file and environment support.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::path::Path;

use satchel_types::ChainId;

use crate::error::WalletError;

/// Configuration for the wallet store.
///
/// Can be loaded from a TOML file via [`WalletConfig::from_toml_file`], from
/// `SATCHEL_*` environment variables via [`WalletConfig::from_env`], or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Address of the tracked ERC-20-style token contract.
    pub token_address: Address,

    /// JSON-RPC endpoint for the bundled HTTP transport.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// When set, `update_balances` refuses to read balances unless the
    /// provider reports this chain id.
    #[serde(default = "default_expected_chain_id")]
    pub expected_chain_id: Option<ChainId>,

    /// When true, `update_balances` refuses to read balances unless
    /// contract code exists at `token_address`.
    #[serde(default = "default_true")]
    pub require_token_code: bool,
}

impl WalletConfig {
    /// Build a config with the default guards: BSC testnet, code check on.
    pub fn new(token_address: Address) -> Self {
        Self {
            token_address,
            rpc_url: default_rpc_url(),
            expected_chain_id: default_expected_chain_id(),
            require_token_code: true,
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, WalletError> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| WalletError::Config(format!("failed to read config file: {e}")))?;
        toml::from_str(&raw).map_err(|e| WalletError::Config(format!("invalid config file: {e}")))
    }

    /// Load configuration from the environment.
    ///
    /// `SATCHEL_TOKEN_ADDRESS` is required. `SATCHEL_RPC_URL`,
    /// `SATCHEL_EXPECTED_CHAIN_ID` (the literal `none` disables the network
    /// guard) and `SATCHEL_REQUIRE_TOKEN_CODE` override their defaults.
    pub fn from_env() -> Result<Self, WalletError> {
        let token = std::env::var("SATCHEL_TOKEN_ADDRESS")
            .map_err(|_| WalletError::Config("SATCHEL_TOKEN_ADDRESS is not set".into()))?;
        let token_address = token
            .parse()
            .map_err(|_| WalletError::Config(format!("invalid token address: {token}")))?;

        let mut config = Self::new(token_address);

        if let Ok(url) = std::env::var("SATCHEL_RPC_URL") {
            config.rpc_url = url;
        }
        if let Ok(id) = std::env::var("SATCHEL_EXPECTED_CHAIN_ID") {
            config.expected_chain_id = if id.eq_ignore_ascii_case("none") {
                None
            } else {
                let id: u64 = id
                    .parse()
                    .map_err(|_| WalletError::Config(format!("invalid chain id: {id}")))?;
                Some(ChainId::new(id))
            };
        }
        if let Ok(flag) = std::env::var("SATCHEL_REQUIRE_TOKEN_CODE") {
            config.require_token_code = flag
                .parse()
                .map_err(|_| WalletError::Config(format!("invalid boolean: {flag}")))?;
        }

        Ok(config)
    }
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_rpc_url() -> String {
    "https://data-seed-prebsc-1-s1.binance.org:8545".to_string()
}

fn default_expected_chain_id() -> Option<ChainId> {
    Some(ChainId::BSC_TESTNET)
}

fn default_true() -> bool {
    true
}
