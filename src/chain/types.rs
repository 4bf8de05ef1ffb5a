//! Types for the CosmWasm vault contract query interface

use serde::{Deserialize, Serialize};

/// A token amount as returned by the contract: denomination plus magnitude.
///
/// The amount is kept as a string because contract `Uint128` values exceed
/// what JSON numbers can carry losslessly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Coin {
    /// The token denomination (native or IBC denom string).
    pub denom: String,
    /// The amount as a base-10 string.
    pub amount: String,
}

/// One vault record from the contract's paginated `get_vaults` query.
///
/// Vaults are immutable snapshots read from the contract; the scanner never
/// mutates them. The contract returns more fields than these, which are
/// ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vault {
    /// The vault identifier (`Uint128` serialized as a string). Pagination
    /// cursors are derived from this under the last-id cursor policy.
    pub id: String,
    /// The owner address. This is the vault's identity for notification
    /// and logging purposes.
    pub owner: String,
    /// The total amount deposited into the vault.
    pub deposited_amount: Coin,
}

/// Response shape of the contract's `get_vaults` query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultsResponse {
    /// The vaults in this page, in ascending id order.
    pub vaults: Vec<Vault>,
}

/// A single key/value attribute within an emitted event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

/// One typed event from a transaction's log, with its ordered attributes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    /// The event type label (e.g. `wasm`, `transfer`).
    #[serde(rename = "type")]
    pub event_type: String,
    /// The attributes in emission order.
    pub attributes: Vec<Attribute>,
}

/// Error types for chain query operations
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Query failed with status {0}")]
    StatusError(reqwest::StatusCode),

    #[error("No data returned")]
    NoData,
}
