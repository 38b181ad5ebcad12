//! The wallet session record.

use serde::{Deserialize, Serialize};

use satchel_types::{BnbAmount, TokenAmount};

/// Snapshot of the wallet session.
///
/// Defaults to the disconnected state: no address, not connected, both
/// balances zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletState {
    /// Currently connected account, if any. Held as the raw string the
    /// embedder supplied; the store does not validate address format.
    pub address: Option<String>,
    /// Whether a wallet session is active.
    pub is_connected: bool,
    /// Native-coin balance of `address`, in wei.
    pub bnb_balance: BnbAmount,
    /// Token balance of `address`, in the token's smallest unit.
    pub token_balance: TokenAmount,
}

impl WalletState {
    /// Reset to the disconnected defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
