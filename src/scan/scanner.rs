//! Vault scan orchestration.
//!
//! The scanner drives a single sequential pass over the contract's vault
//! collection: fetch a page, classify and notify every vault on it, fetch the
//! next page. Query failures abort the scan; notification failures are logged
//! with the vault owner and the scan continues. The scanner keeps no durable
//! progress marker, so resuming after a crash restarts from whatever cursor
//! the operator supplies and will re-notify already-processed vaults.

use crate::chain::{QueryError, Vault, VaultQuery, VaultsResponse};
use crate::pagination::{PageSource, Paginator};
use crate::scan::classifier::Classifier;
use crate::scan::notifier::{CampaignNotifier, NotificationEvent, PARTNER_NAME};
use crate::scan::progress::{ScanProgress, ScanStats};
use tracing::{error, info, warn};

/// How the next `start_after` cursor is derived from a fetched page.
#[derive(Debug, Clone)]
pub enum CursorPolicy {
	/// Advance to the last returned vault's id. The default, and the only
	/// policy consistent with a continue-from-last-seen pagination contract.
	LastVaultId,
	/// Advance the previous cursor by a fixed numeric stride, independent of
	/// the page's content. Kept for parity with deployments whose cursors are
	/// dense numeric ids; a non-numeric cursor ends the scan with a warning.
	FixedStride(u64),
}

impl CursorPolicy {
	fn advance(&self, previous: Option<&str>, page: &VaultsResponse) -> Option<String> {
		match self {
			CursorPolicy::LastVaultId => page.vaults.last().map(|vault| vault.id.clone()),
			CursorPolicy::FixedStride(stride) => {
				let base = match previous.map(str::parse::<u64>) {
					Some(Ok(cursor)) => cursor,
					Some(Err(_)) => {
						warn!(
							"Cursor {:?} is not numeric, cannot advance by stride",
							previous
						);
						return None;
					}
					None => 0,
				};
				Some((base + stride).to_string())
			}
		}
	}
}

/// Configuration for one scan invocation.
///
/// `stop_threshold` and `page_limit` are independent values: the scan stops
/// after processing a page with fewer than `stop_threshold` vaults. They
/// default to the same number: a threshold above the limit stops after every
/// page, one below it risks looping on a partially-full tail page.
#[derive(Debug, Clone)]
pub struct ScanConfig {
	/// Requested page size for each `get_vaults` call.
	pub page_limit: u32,
	/// Stop once a page returns fewer vaults than this.
	pub stop_threshold: u32,
	/// How the cursor advances between pages.
	pub cursor_policy: CursorPolicy,
	/// Cursor to resume from, typically operator-supplied.
	pub start_after: Option<String>,
}

impl Default for ScanConfig {
	fn default() -> Self {
		Self {
			page_limit: 300,
			stop_threshold: 300,
			cursor_policy: CursorPolicy::LastVaultId,
			start_after: None,
		}
	}
}

/// Page source over the contract's vault query, parameterized by the scan
/// configuration's limit, threshold, and cursor policy.
struct VaultPageSource<'a, Q: VaultQuery> {
	query: &'a Q,
	config: &'a ScanConfig,
}

#[async_trait::async_trait]
impl<'a, Q: VaultQuery> PageSource for VaultPageSource<'a, Q> {
	type Page = VaultsResponse;
	type Item = Vault;
	type Cursor = String;
	type Error = QueryError;

	async fn fetch_page(&mut self, cursor: Option<&String>) -> Result<VaultsResponse, QueryError> {
		self.query
			.get_vaults(self.config.page_limit, cursor.map(String::as_str))
			.await
	}

	fn page_items(&self, page: &VaultsResponse) -> Vec<Vault> {
		page.vaults.clone()
	}

	fn next_cursor(&self, previous: Option<&String>, page: &VaultsResponse) -> Option<String> {
		if (page.vaults.len() as u32) < self.config.stop_threshold {
			return None;
		}
		self.config
			.cursor_policy
			.advance(previous.map(String::as_str), page)
	}
}

/// Scanner applying classification and notification to every vault in the
/// collection, one page at a time.
pub struct VaultScanner<Q: VaultQuery, N: CampaignNotifier> {
	query: Q,
	notifier: N,
	classifier: Classifier,
	chain: String,
	partner_key: String,
	config: ScanConfig,
}

impl<Q: VaultQuery, N: CampaignNotifier> VaultScanner<Q, N> {
	pub fn new(
		query: Q,
		notifier: N,
		classifier: Classifier,
		chain: String,
		partner_key: String,
		config: ScanConfig,
	) -> Self {
		Self {
			query,
			notifier,
			classifier,
			chain,
			partner_key,
			config,
		}
	}

	/// Run one full scan from the configured start cursor.
	///
	/// Returns the scan statistics on completion. A [`QueryError`] aborts the
	/// scan and may leave the collection partially processed; the operator
	/// must resume from a known-good cursor. Notification failures never
	/// abort the scan.
	pub async fn scan(&self) -> Result<ScanStats, QueryError> {
		info!(
			"Starting vault scan on {} from cursor {:?}",
			self.chain, self.config.start_after
		);

		let source = VaultPageSource {
			query: &self.query,
			config: &self.config,
		};
		let mut paginator = Paginator::with_start(source, self.config.start_after.clone());
		let mut progress = ScanProgress::new();

		while let Some(batch) = paginator.next_batch().await {
			let vaults = batch?;
			progress.record_page(vaults.len());

			for vault in &vaults {
				let campaign = self
					.classifier
					.classify(&self.chain, &vault.deposited_amount.denom);

				info!("{} has completed {} campaign", vault.owner, campaign);

				let event = NotificationEvent {
					chain: self.chain.clone(),
					address: vault.owner.clone(),
					partner_name: PARTNER_NAME.to_string(),
					partner_key: self.partner_key.clone(),
					campaign,
				};

				match self.notifier.notify(&event).await {
					Ok(()) => progress.record_notified(),
					Err(e) => {
						error!("Failed to send campaign event for {}: {}", vault.owner, e);
						progress.record_failed();
					}
				}
			}

			progress.log_progress(false);
		}

		let stats = progress.stats();
		info!("Vault scan completed: {}", stats.summary());
		Ok(stats)
	}
}
