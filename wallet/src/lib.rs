//! Wallet session library for a BNB Smart Chain dapp.
//!
//! Provides everything the front end needs to track a wallet session:
//! - Connection state (account address + connected flag)
//! - Native-coin and token balances, refreshed on demand through an
//!   injected JSON-RPC provider
//! - Best-effort network and contract-existence guards around the refresh
//!
//! Balance refresh is deliberately silent on failure: the session keeps
//! whatever values it had and the failure is only logged. See
//! [`WalletStore::update_balances`].

pub mod config;
pub mod error;
pub mod logging;
pub mod state;
pub mod store;

pub use config::WalletConfig;
pub use error::WalletError;
pub use logging::{init_logging, LogFormat};
pub use state::WalletState;
pub use store::WalletStore;
