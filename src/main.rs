mod chain;
mod config;
mod pagination;
mod scan;

use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::from_default_env()
				.add_directive(tracing::Level::INFO.into()),
		)
		.with_target(false)
		.with_timer(tracing_subscriber::fmt::time::time())
		.init();

	info!("Starting vault campaign scan");

	let config = match config::fetch_config() {
		Ok(config) => config,
		Err(e) => {
			error!("Configuration error: {}", e);
			std::process::exit(1);
		}
	};

	let client =
		chain::ChainQueryClient::new(config.net_url.clone(), config.contract_address.clone());

	info!("Created chain query client");

	let notifier = scan::HttpCampaignNotifier::new(config.campaign_url.clone());
	let classifier = scan::Classifier::new(config.campaign_rules.clone());

	let scan_config = scan::ScanConfig {
		page_limit: config.page_limit,
		stop_threshold: config.page_limit,
		cursor_policy: scan::CursorPolicy::LastVaultId,
		start_after: Some(config.start_after.clone()),
	};

	let scanner = scan::VaultScanner::new(
		client,
		notifier,
		classifier,
		config.chain.clone(),
		config.partner_key.clone(),
		scan_config,
	);

	match scanner.scan().await {
		Ok(stats) => {
			info!("Scan finished: {}", stats.summary());
		}
		Err(e) => {
			error!("Scan failed: {}", e);
			std::process::exit(1);
		}
	}
}
