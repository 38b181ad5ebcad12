//! JSON-RPC transport and read-only EVM chain client.
//!
//! Two seams, both injectable so tests and embedders can substitute their
//! own implementations:
//! - [`RpcTransport`]: the raw JSON-RPC request pipe (a browser wallet
//!   bridge, an HTTP endpoint, a scripted mock).
//! - [`ChainReader`]: the typed read-only view of chain state the wallet
//!   store consumes: chain id, contract code, native balance, token balance.
//!
//! [`EthClient`] connects the two: it implements [`ChainReader`] by encoding
//! `eth_*` requests onto whatever transport it was given.

pub mod erc20;
pub mod error;
pub mod eth;
mod quantity;
pub mod transport;

pub use error::ProviderError;
pub use eth::{ChainReader, EthClient};
pub use transport::{HttpTransport, RpcTransport};
