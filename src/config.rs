//! Process configuration loaded from environment variables.
//!
//! Every required setting must be present before the scan starts; a missing
//! or malformed value is a fatal error raised before any network call. The
//! loader is factored over an injected lookup so tests can supply values
//! without touching the process environment.

use crate::scan::CampaignRules;

/// Default reward-service base URL.
const DEFAULT_CAMPAIGN_URL: &str = "https://campaign-ts.xdefi.services";

/// Default `get_vaults` page size.
const DEFAULT_PAGE_LIMIT: u32 = 300;

/// Resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address of the vault contract to scan.
    pub contract_address: String,
    /// Cursor to resume the scan from.
    pub start_after: String,
    /// Base URL of the chain's LCD endpoint.
    pub net_url: String,
    /// Chain identity, e.g. "kujira".
    pub chain: String,
    /// Partner credential sent with each notification.
    pub partner_key: String,
    /// Base URL of the reward service.
    pub campaign_url: String,
    /// Requested page size for vault queries.
    pub page_limit: u32,
    /// Per-chain premium denomination allow-list.
    pub campaign_rules: CampaignRules,
}

/// Error types for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing {0} environment variable")]
    MissingVar(&'static str),

    #[error("Invalid {name} environment variable: {reason}")]
    InvalidVar { name: &'static str, reason: String },
}

/// Load configuration from the process environment.
pub fn fetch_config() -> Result<Config, ConfigError> {
    config_from(|name| std::env::var(name).ok())
}

/// Load configuration through the given variable lookup.
pub fn config_from<F>(lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let require = |name: &'static str| lookup(name).ok_or(ConfigError::MissingVar(name));

    let contract_address = require("DCA_CONTRACT_ADDRESS")?;
    let start_after = require("START_AFTER")?;
    let net_url = require("NET_URL")?;
    let chain = require("CHAIN")?;
    let partner_key = require("XDEFI_PARTNER_ID")?;

    let campaign_url = lookup("CAMPAIGN_URL").unwrap_or_else(|| DEFAULT_CAMPAIGN_URL.to_string());

    let page_limit = match lookup("PAGE_LIMIT") {
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
            name: "PAGE_LIMIT",
            reason: format!("{:?} is not a positive integer", raw),
        })?,
        None => DEFAULT_PAGE_LIMIT,
    };

    let campaign_rules = match lookup("PREMIUM_DENOMS") {
        Some(raw) => CampaignRules::from_json(&raw).map_err(|e| ConfigError::InvalidVar {
            name: "PREMIUM_DENOMS",
            reason: e.to_string(),
        })?,
        None => CampaignRules::default(),
    };

    Ok(Config {
        contract_address,
        start_after,
        net_url,
        chain,
        partner_key,
        campaign_url,
        page_limit,
        campaign_rules,
    })
}
