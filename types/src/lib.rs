//! Fundamental types for the satchel wallet session library.
//!
//! This crate defines the types shared by the provider and wallet crates:
//! chain identifiers and smallest-unit balance amounts.

pub mod amount;
pub mod chain;

pub use amount::{BnbAmount, ParseAmountError, TokenAmount};
pub use chain::ChainId;
