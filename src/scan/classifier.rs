//! Vault classification into campaign tags.
//!
//! A vault earns the premium campaign when its deposited denomination is on
//! the active chain's stablecoin allow-list; everything else falls through to
//! the default campaign. Classification is total: unknown chains, unknown
//! denominations, and malformed input all map to the default tag.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// The closed set of campaign tags a vault can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Campaign {
    /// Premium campaign for vaults accumulating out of a stablecoin.
    Accumulate,
    /// Default campaign for every other vault.
    TakeProfit,
}

impl Campaign {
    /// The tag used in notification endpoint paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Campaign::Accumulate => "calc_accumulate",
            Campaign::TakeProfit => "calc_takeprofit",
        }
    }
}

impl fmt::Display for Campaign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-chain allow-list of premium denominations.
///
/// Carried as explicit configuration rather than a compiled-in table so new
/// chains can be added without a redeploy. [`CampaignRules::default`] seeds
/// the known chains.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignRules {
    premium_denoms: HashMap<String, HashSet<String>>,
}

impl CampaignRules {
    /// Parse rules from a JSON object mapping chain identity to a list of
    /// premium denominations.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    fn is_premium(&self, chain: &str, denom: &str) -> bool {
        self.premium_denoms
            .get(chain)
            .is_some_and(|denoms| denoms.contains(denom))
    }
}

impl Default for CampaignRules {
    fn default() -> Self {
        let premium_denoms = HashMap::from([
            (
                "kujira".to_string(),
                HashSet::from([
                    "factory/kujira1qk00h5atutpsv900x202pxx42npjr9thg58dnqpa72f2p7m2luase444a7/uusk"
                        .to_string(),
                    "ibc/295548A78785A1007F232DE286149A6FF512F180AF5657780FC89C009E2C348F"
                        .to_string(),
                ]),
            ),
            (
                "osmosis".to_string(),
                HashSet::from([
                    "ibc/92BE0717F4678905E53F4E45B2DED18BC0CB97BF1F8B6A25AFEDF3D5A879B4D5"
                        .to_string(),
                    "ibc/8242AD24008032E457D2E12D46588FD39FB54FB29680C6C7663D296B383C37C4"
                        .to_string(),
                    "ibc/0CD3A0285E1341859B5E86B6AB7682F023D03E97607CCC1DC95706411D866DF7"
                        .to_string(),
                    "ibc/D189335C6E4A68B513C10AB227BF1C1D38C746766278BA3EEB4FB14124F1D858"
                        .to_string(),
                ]),
            ),
        ]);

        Self { premium_denoms }
    }
}

/// Pure classifier from (chain, denomination) to campaign tag.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: CampaignRules,
}

impl Classifier {
    pub fn new(rules: CampaignRules) -> Self {
        Self { rules }
    }

    /// Classify a vault's deposited denomination on the given chain.
    ///
    /// Never fails: any denomination outside the chain's allow-list, and any
    /// chain without an allow-list, yields [`Campaign::TakeProfit`].
    pub fn classify(&self, chain: &str, denom: &str) -> Campaign {
        if self.rules.is_premium(chain, denom) {
            Campaign::Accumulate
        } else {
            Campaign::TakeProfit
        }
    }
}
