//! Decoding helpers for JSON-RPC hex quantities and byte blobs.

use alloy_primitives::U256;

use crate::error::ProviderError;

/// Parse a `0x`-prefixed hex quantity (e.g. `"0x61"`) into a `U256`.
pub(crate) fn parse_quantity(s: &str) -> Result<U256, ProviderError> {
    let digits = strip_prefix(s)?;
    if digits.is_empty() {
        return Err(ProviderError::InvalidResponse(format!(
            "empty hex quantity: {s:?}"
        )));
    }
    U256::from_str_radix(digits, 16)
        .map_err(|e| ProviderError::InvalidResponse(format!("bad hex quantity {s:?}: {e}")))
}

/// Parse a `0x`-prefixed hex quantity that must fit in a `u64` (chain ids).
pub(crate) fn parse_u64_quantity(s: &str) -> Result<u64, ProviderError> {
    let value = parse_quantity(s)?;
    value
        .try_into()
        .map_err(|_| ProviderError::InvalidResponse(format!("quantity out of u64 range: {s}")))
}

/// Parse `0x`-prefixed hex bytes (contract code, call return data).
///
/// `"0x"` decodes to the empty byte string, which is how a node reports
/// "no contract deployed here".
pub(crate) fn parse_bytes(s: &str) -> Result<Vec<u8>, ProviderError> {
    let digits = strip_prefix(s)?;
    hex::decode(digits)
        .map_err(|e| ProviderError::InvalidResponse(format!("bad hex bytes {s:?}: {e}")))
}

fn strip_prefix(s: &str) -> Result<&str, ProviderError> {
    s.strip_prefix("0x")
        .ok_or_else(|| ProviderError::InvalidResponse(format!("missing 0x prefix: {s:?}")))
}
