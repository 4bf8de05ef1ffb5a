//! Progress tracking for vault scans.
//!
//! The tracker counts pages, vaults, and notification outcomes as the scan
//! advances, logs progress at page intervals, and produces a summary for the
//! end of the run. It holds no durable state; a fresh tracker is created per
//! scan invocation.

use tracing::info;

/// Pages between periodic progress log lines.
const LOG_PAGE_INTERVAL: usize = 10;

/// Counters for one scan invocation
#[derive(Debug, Clone)]
pub struct ScanProgress {
    pages_fetched: usize,
    vaults_processed: usize,
    notifications_sent: usize,
    notifications_failed: usize,
    last_logged_page: usize,
}

impl ScanProgress {
    pub fn new() -> Self {
        Self {
            pages_fetched: 0,
            vaults_processed: 0,
            notifications_sent: 0,
            notifications_failed: 0,
            last_logged_page: 0,
        }
    }

    /// Record a fetched page and how many vaults it carried.
    pub fn record_page(&mut self, vault_count: usize) {
        self.pages_fetched += 1;
        self.vaults_processed += vault_count;
    }

    /// Record one successful notification delivery.
    pub fn record_notified(&mut self) {
        self.notifications_sent += 1;
    }

    /// Record one failed notification delivery.
    pub fn record_failed(&mut self) {
        self.notifications_failed += 1;
    }

    /// Log progress at page intervals or when forced.
    pub fn log_progress(&mut self, force: bool) {
        let pages_since_last_log = self.pages_fetched - self.last_logged_page;
        if force || pages_since_last_log >= LOG_PAGE_INTERVAL {
            info!(
                "Scan progress: {} vaults across {} pages, {} notified, {} failed",
                self.vaults_processed,
                self.pages_fetched,
                self.notifications_sent,
                self.notifications_failed
            );
            self.last_logged_page = self.pages_fetched;
        }
    }

    /// Snapshot the counters into a [`ScanStats`].
    pub fn stats(&self) -> ScanStats {
        ScanStats {
            pages_fetched: self.pages_fetched,
            vaults_processed: self.vaults_processed,
            notifications_sent: self.notifications_sent,
            notifications_failed: self.notifications_failed,
        }
    }
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics for a completed scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanStats {
    pub pages_fetched: usize,
    pub vaults_processed: usize,
    pub notifications_sent: usize,
    pub notifications_failed: usize,
}

impl ScanStats {
    /// Get a human-readable summary of the scan
    pub fn summary(&self) -> String {
        format!(
            "{} vaults across {} pages: {} notifications sent, {} failed",
            self.vaults_processed,
            self.pages_fetched,
            self.notifications_sent,
            self.notifications_failed
        )
    }
}
