//! Settings of the hub client and of the dashboard built on top of it.
//!
//! Every field has a default, so a configuration file only needs to name
//! what differs, typically the `space`:
//!
//! ```
//! use gov_hub::HubConfig;
//!
//! let config = HubConfig::from_json_str(r#"{ "space": "mydao.eth" }"#).unwrap();
//! assert_eq!(config.space, "mydao.eth");
//! assert_eq!(config.page_size, 3);
//! ```

use crate::session::Address;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};
use thiserror::Error;

pub const DEFAULT_HUB_URL: &str = "https://hub.snapshot.org";
pub const DEFAULT_GRAPHQL_URL: &str = "https://hub.snapshot.org/graphql";
pub const DEFAULT_SPACE: &str = "jonomnom.eth";
pub const DEFAULT_APP: &str = "snapshot";
pub const DEFAULT_EXPLORER_BLOCK_URL: &str = "https://etherscan.io/block/";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read configuration file")]
    Io(#[from] std::io::Error),

    #[error("malformed configuration")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// A collection whose holders may vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftCollection {
    pub name: String,
    pub address: Address,
    #[serde(default)]
    pub token_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HubConfig {
    pub graphql_url: String,
    pub hub_url: String,
    pub space: String,
    /// number of proposals listed, most recent first
    pub page_size: u32,
    /// name the votes are attributed to
    pub app: String,
    pub explorer_block_url: String,
    pub nft_collections: Vec<NftCollection>,
    /// refuse to submit votes for wallets holding none of the collections
    pub enforce_eligibility: bool,
    pub request_timeout_secs: u64,
}

impl Default for HubConfig {
    fn default() -> Self {
        HubConfig {
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            hub_url: DEFAULT_HUB_URL.to_string(),
            space: DEFAULT_SPACE.to_string(),
            page_size: 3,
            app: DEFAULT_APP.to_string(),
            explorer_block_url: DEFAULT_EXPLORER_BLOCK_URL.to_string(),
            nft_collections: default_collections(),
            enforce_eligibility: false,
            request_timeout_secs: 30,
        }
    }
}

impl HubConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: HubConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.space.is_empty() {
            return Err(ConfigError::Invalid("space cannot be empty"));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1"));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request_timeout_secs must be at least 1"));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn msg_url(&self) -> String {
        format!("{}/api/msg", self.hub_url.trim_end_matches('/'))
    }
}

fn default_collections() -> Vec<NftCollection> {
    [
        ("Gen 1", "0x1bbca92fc889af891e3b666aee7cb3534b83d7b7"),
        ("Gen 2", "0x8B9Ada84CBFBE266d103E6c90717Df789B63d0F7"),
    ]
    .iter()
    .filter_map(|(name, address)| {
        address.parse().ok().map(|address| NftCollection {
            name: name.to_string(),
            address,
            token_id: 0,
        })
    })
    .collect()
}
