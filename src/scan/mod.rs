//! Vault Scan Module
//!
//! This module provides the scan/classify/notify loop over the contract's
//! vault collection. It is composed of several submodules, each responsible
//! for one aspect of the scan:
//!
//! - `scanner`: The main driver. Walks the paginated vault query and applies
//!   classification and notification to every vault.
//! - `classifier`: Maps a vault's deposited denomination (and chain) to a
//!   campaign tag using a configurable allow-list.
//! - `notifier`: Posts one campaign event per classified vault to the reward
//!   service, with bounded retry and an idempotency key.
//! - `progress`: Tracks scan counters and produces the end-of-run summary.

/// Classification of vaults into campaign tags
pub mod classifier;
/// Outbound campaign notification dispatch
pub mod notifier;
/// Scan progress counters and statistics
pub mod progress;
/// Main driver for the vault scan
pub mod scanner;

pub use classifier::{CampaignRules, Classifier};
pub use notifier::HttpCampaignNotifier;
pub use scanner::{CursorPolicy, ScanConfig, VaultScanner};
