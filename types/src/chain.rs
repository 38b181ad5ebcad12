//! EVM network identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies which EVM network a provider is connected to.
///
/// Chain ids follow EIP-155: 1 is Ethereum mainnet, 56 is BNB Smart Chain,
/// 97 is the BNB Smart Chain testnet, and so on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(u64);

impl ChainId {
    /// BNB Smart Chain mainnet.
    pub const BSC_MAINNET: Self = Self(56);
    /// BNB Smart Chain testnet (Chapel).
    pub const BSC_TESTNET: Self = Self(97);

    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Human-readable name for networks this library knows about.
    pub fn name(&self) -> &'static str {
        match self.0 {
            1 => "ethereum",
            56 => "bsc",
            97 => "bsc-testnet",
            _ => "unknown",
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
