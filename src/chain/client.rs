//!
//! HTTP client for the chain's LCD endpoint.
//!
//! This module provides an async client for querying the vault contract through
//! the chain's REST (LCD) interface. Smart queries are JSON messages encoded as
//! base64 into the request path; responses come back wrapped in a `data`
//! envelope. All methods are async and designed for use with Tokio.

use super::events::decode_event_attributes;
use super::types::{Event, QueryError, VaultsResponse};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Seam over the contract's paginated vault query.
///
/// The scanner consumes this trait rather than the concrete client so tests
/// can drive it with canned pages.
#[async_trait::async_trait]
pub trait VaultQuery: Send + Sync {
	/// Fetch one page of vaults, starting after the given cursor.
	async fn get_vaults(
		&self,
		limit: u32,
		start_after: Option<&str>,
	) -> Result<VaultsResponse, QueryError>;
}

/// Envelope the LCD wraps around smart query responses.
#[derive(Debug, Deserialize)]
struct SmartQueryResponse<T> {
	data: T,
}

/// Client for contract smart queries over the chain's LCD endpoint
#[derive(Clone)]
pub struct ChainQueryClient {
	/// The underlying HTTP client.
	http_client: Client,
	/// The base URL of the LCD endpoint.
	lcd_url: String,
	/// The address of the vault contract.
	contract_address: String,
}

impl ChainQueryClient {
	/// Create a new chain query client.
	///
	/// # Arguments
	/// * `lcd_url` - The base URL of the chain's LCD endpoint.
	/// * `contract_address` - The vault contract address to query.
	pub fn new(lcd_url: String, contract_address: String) -> Self {
		let http_client = Client::builder()
			.timeout(Duration::from_secs(30))
			.build()
			.expect("Failed to create HTTP client");

		Self {
			http_client,
			lcd_url,
			contract_address,
		}
	}

	/// Execute a smart query against the vault contract.
	///
	/// The query message is serialized to JSON, base64-encoded into the
	/// request path, and the response `data` envelope is deserialized into
	/// the requested type.
	pub async fn smart_query<T: DeserializeOwned>(
		&self,
		message: &serde_json::Value,
	) -> Result<T, QueryError> {
		let encoded = BASE64.encode(serde_json::to_vec(message)?);
		let url = format!(
			"{}/cosmwasm/wasm/v1/contract/{}/smart/{}",
			self.lcd_url, self.contract_address, encoded
		);

		debug!("Executing smart query: {}", message);

		let response = self.http_client.get(&url).send().await?;

		if !response.status().is_success() {
			return Err(QueryError::StatusError(response.status()));
		}

		let body: SmartQueryResponse<T> = response.json().await?;
		Ok(body.data)
	}

	/// Fetch a transaction's event log and decode it into an attribute map.
	///
	/// Looks up the transaction by hash, takes the first message log's
	/// events, and folds them with [`decode_event_attributes`].
	#[allow(dead_code)]
	pub async fn tx_attributes(
		&self,
		tx_hash: &str,
	) -> Result<HashMap<String, HashMap<String, String>>, QueryError> {
		let url = format!("{}/cosmos/tx/v1beta1/txs/{}", self.lcd_url, tx_hash);

		let response = self.http_client.get(&url).send().await?;

		if !response.status().is_success() {
			return Err(QueryError::StatusError(response.status()));
		}

		let body: serde_json::Value = response.json().await?;

		let events = body
			.get("tx_response")
			.and_then(|tx| tx.get("logs"))
			.and_then(|logs| logs.get(0))
			.and_then(|log| log.get("events"))
			.ok_or(QueryError::NoData)?;

		let events: Vec<Event> = serde_json::from_value(events.clone())?;
		Ok(decode_event_attributes(&events))
	}
}

#[async_trait::async_trait]
impl VaultQuery for ChainQueryClient {
	async fn get_vaults(
		&self,
		limit: u32,
		start_after: Option<&str>,
	) -> Result<VaultsResponse, QueryError> {
		let message = json!({
			"get_vaults": {
				"limit": limit,
				"start_after": start_after,
			}
		});

		self.smart_query(&message).await
	}
}
