//! Chain query integration module
//!
//! This module provides the client and types for querying the vault contract
//! through the chain's LCD endpoint, plus the decoder that turns transaction
//! event logs into structured attribute maps.

/// HTTP client for contract smart queries
mod client;
/// Event log decoding
mod events;
/// Type definitions for contract query data
mod types;

pub use client::{ChainQueryClient, VaultQuery};
pub use types::*;
