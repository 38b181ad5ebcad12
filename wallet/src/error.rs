use alloy_primitives::Address;
use thiserror::Error;

use satchel_provider::ProviderError;
use satchel_types::ChainId;

/// Errors arising inside the wallet store.
///
/// None of these escape the four store operations (`update_balances`
/// catches and logs them), but the fallible core and the config loaders
/// surface them typed.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("wrong network: expected chain {expected}, provider is on chain {actual}")]
    WrongNetwork { expected: ChainId, actual: ChainId },

    #[error("no contract code at token address {0}")]
    NoContract(Address),

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("config error: {0}")]
    Config(String),
}
