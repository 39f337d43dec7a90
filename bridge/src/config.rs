// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Bridge configuration.
//!
//! Loaded from a TOML file; every section and every key is optional and
//! falls back to the defaults below. The node endpoint can be overridden by
//! the `OPERA_BRIDGE_NODE_URL` environment variable, which takes precedence
//! over the file.
//!
//! ```toml
//! [node]
//! url = "http://127.0.0.1:18545"
//! request_timeout = "30s"
//!
//! [cache]
//! eviction = "1h"
//!
//! [staking]
//! sfc = "0xFC00FACE00000000000000000000000000000000"
//!
//! [defi]
//! address_provider = "0x730e27f6c52d07b1a6ab39b639b617dc566c91af"
//! tokens = ["0x..."]
//! ```

use std::path::Path;
use std::time::Duration;
use std::{env, fs, io};

use opera_bridge_core::ContractAddress;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shards::MAX_TTL;

/// Environment variable overriding [`NodeConfig::url`].
pub const NODE_URL_ENV: &str = "OPERA_BRIDGE_NODE_URL";

/// Default node endpoint, a local node.
pub const DEFAULT_NODE_URL: &str = "http://127.0.0.1:18545";

/// Default lifetime of cached derived contract addresses.
pub const DEFAULT_CACHE_EVICTION: Duration = Duration::from_secs(60 * 60);

/// Default address of the SFC staking contract.
pub const DEFAULT_SFC_CONTRACT: ContractAddress = ContractAddress::new([
    0xfc, 0x00, 0xfa, 0xce, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
]);

/// Default address of the fMint address provider.
pub const DEFAULT_FMINT_ADDRESS_PROVIDER: ContractAddress =
    ContractAddress::new([
        0x73, 0x0e, 0x27, 0xf6, 0xc5, 0x2d, 0x07, 0xb1, 0xa6, 0xab, 0x39,
        0xb6, 0x39, 0xb6, 0x17, 0xdc, 0x56, 0x6c, 0x91, 0xaf,
    ]);

/// Errors raised while loading the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Cannot read configuration file: {0}")]
    Io(#[from] io::Error),
    /// The configuration file is not valid TOML or has invalid values
    #[error("Invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
    /// A value is syntactically valid but unusable
    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue {
        /// Offending key
        key: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

/// Complete bridge configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Node connection.
    pub node: NodeConfig,
    /// Cache lifetimes.
    pub cache: CacheConfig,
    /// Staking contracts.
    pub staking: StakingConfig,
    /// fMint contracts.
    pub defi: DefiConfig,
}

/// Node connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// JSON-RPC endpoint of the node.
    pub url: String,
    /// Deadline of a single request; unbounded when absent.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Option<Duration>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_NODE_URL.into(),
            request_timeout: None,
        }
    }
}

/// Cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Lifetime of derived contract addresses.
    #[serde(with = "humantime_serde")]
    pub eviction: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            eviction: DEFAULT_CACHE_EVICTION,
        }
    }
}

/// Staking contract settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StakingConfig {
    /// The SFC contract, owner of the constants shard locator.
    pub sfc: ContractAddress,
}

impl Default for StakingConfig {
    fn default() -> Self {
        Self {
            sfc: DEFAULT_SFC_CONTRACT,
        }
    }
}

/// fMint contract settings.
///
/// The minter, price oracle and token registry are located through the
/// address provider unless a static address is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefiConfig {
    /// The fMint address provider.
    pub address_provider: ContractAddress,
    /// Static address of the minter (accounting) contract.
    pub minter: Option<ContractAddress>,
    /// Static address of the price oracle.
    pub price_oracle: Option<ContractAddress>,
    /// Static token list; read from the on-chain registry when absent.
    pub tokens: Option<Vec<ContractAddress>>,
}

impl Default for DefiConfig {
    fn default() -> Self {
        Self {
            address_provider: DEFAULT_FMINT_ADDRESS_PROVIDER,
            minter: None,
            price_oracle: None,
            tokens: None,
        }
    }
}

impl Config {
    /// Loads the configuration from `path`, applying environment
    /// overrides.
    ///
    /// Without a path, or when the file does not exist, the defaults are
    /// used.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) if path.exists() => {
                Self::from_toml(&fs::read_to_string(path)?)?
            }
            _ => Self::default(),
        };

        if let Ok(url) = env::var(NODE_URL_ENV) {
            config.node.url = url;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.node.url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "node.url",
                reason: "must not be empty".into(),
            });
        }
        if self.cache.eviction.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "cache.eviction",
                reason: "must be greater than zero".into(),
            });
        }
        if self.cache.eviction > MAX_TTL {
            return Err(ConfigError::InvalidValue {
                key: "cache.eviction",
                reason: format!(
                    "must not exceed {}",
                    humantime_serde::re::humantime::format_duration(MAX_TTL)
                ),
            });
        }
        Ok(())
    }
}
