//! Minimal ERC-20 call encoding.
//!
//! Only the single read the wallet needs: `balanceOf(address)`.

use alloy_primitives::{Address, U256};

use crate::error::ProviderError;

/// 4-byte function selector for `balanceOf(address)`.
pub const BALANCE_OF_SELECTOR: [u8; 4] = [0x70, 0xa0, 0x82, 0x31];

/// Encode calldata for `balanceOf(owner)`.
///
/// The owner is the raw address string the wallet holds. ABI encoding needs
/// the 20 address bytes, so this is the one place a malformed account
/// address surfaces before reaching the node.
pub fn encode_balance_of(owner: &str) -> Result<Vec<u8>, ProviderError> {
    let owner: Address = owner
        .parse()
        .map_err(|_| ProviderError::InvalidAddress(owner.to_string()))?;
    let mut data = Vec::with_capacity(4 + 32);
    data.extend_from_slice(&BALANCE_OF_SELECTOR);
    data.extend_from_slice(&[0u8; 12]);
    data.extend_from_slice(owner.as_slice());
    Ok(data)
}

/// Decode the single `uint256` return word of `balanceOf`.
pub fn decode_uint256(return_data: &[u8]) -> Result<U256, ProviderError> {
    if return_data.len() < 32 {
        return Err(ProviderError::InvalidResponse(format!(
            "expected a 32-byte uint256 return word, got {} bytes",
            return_data.len()
        )));
    }
    Ok(U256::from_be_slice(&return_data[..32]))
}
