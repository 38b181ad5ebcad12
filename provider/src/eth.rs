//! Typed read-only chain client.
//!
//! [`EthClient`] wraps a [`RpcTransport`] and exposes the four reads the
//! wallet needs as typed methods, one per `eth_*` RPC. All reads are against
//! the `latest` block.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use serde_json::json;

use satchel_types::ChainId;

use crate::erc20;
use crate::error::ProviderError;
use crate::quantity::{parse_bytes, parse_quantity, parse_u64_quantity};
use crate::transport::RpcTransport;

/// Read-only view of chain state, the seam the wallet store depends on.
///
/// Account addresses are passed through as opaque strings: the wallet does
/// not validate address format, so a malformed address travels to the node
/// (or the ABI encoder) and comes back as an error.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Chain identifier of the network the provider is connected to.
    async fn chain_id(&self) -> Result<ChainId, ProviderError>;

    /// Contract code deployed at `address`; empty when there is none.
    async fn code_at(&self, address: Address) -> Result<Vec<u8>, ProviderError>;

    /// Native-coin balance of `address`, in wei.
    async fn native_balance(&self, address: &str) -> Result<U256, ProviderError>;

    /// ERC-20 `balanceOf(owner)` on the `token` contract.
    async fn token_balance(&self, token: Address, owner: &str) -> Result<U256, ProviderError>;
}

/// JSON-RPC implementation of [`ChainReader`].
#[derive(Clone)]
pub struct EthClient {
    transport: Arc<dyn RpcTransport>,
}

impl EthClient {
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self { transport }
    }

    /// Generic read-only contract call (`eth_call` against `latest`).
    pub async fn call(&self, to: Address, data: &[u8]) -> Result<Vec<u8>, ProviderError> {
        let params = json!([
            { "to": to.to_string(), "data": format!("0x{}", hex::encode(data)) },
            "latest",
        ]);
        let result = self.transport.request("eth_call", params).await?;
        parse_bytes(expect_str(&result, "eth_call")?)
    }
}

#[async_trait]
impl ChainReader for EthClient {
    async fn chain_id(&self) -> Result<ChainId, ProviderError> {
        let result = self.transport.request("eth_chainId", json!([])).await?;
        let id = parse_u64_quantity(expect_str(&result, "eth_chainId")?)?;
        Ok(ChainId::new(id))
    }

    async fn code_at(&self, address: Address) -> Result<Vec<u8>, ProviderError> {
        let params = json!([address.to_string(), "latest"]);
        let result = self.transport.request("eth_getCode", params).await?;
        parse_bytes(expect_str(&result, "eth_getCode")?)
    }

    async fn native_balance(&self, address: &str) -> Result<U256, ProviderError> {
        let params = json!([address, "latest"]);
        let result = self.transport.request("eth_getBalance", params).await?;
        parse_quantity(expect_str(&result, "eth_getBalance")?)
    }

    async fn token_balance(&self, token: Address, owner: &str) -> Result<U256, ProviderError> {
        let data = erc20::encode_balance_of(owner)?;
        let word = self.call(token, &data).await?;
        erc20::decode_uint256(&word)
    }
}

fn expect_str<'a>(value: &'a serde_json::Value, method: &str) -> Result<&'a str, ProviderError> {
    value
        .as_str()
        .ok_or_else(|| ProviderError::InvalidResponse(format!("{method} result is not a string")))
}
