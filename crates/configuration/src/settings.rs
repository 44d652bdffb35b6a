use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// The largest page the subgraph will serve for a single `first` argument.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub fetch: FetchSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Endpoint and inception timestamp for every chain we report on.
    #[serde(default = "builtin_chains")]
    pub chains: BTreeMap<ChainId, ChainConfig>,
}

/// Chains the protocol is deployed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ChainId {
    Polygon,
    Xdai,
    Arbitrum,
    Linea,
    Chiliz,
}

impl ChainId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainId::Polygon => "polygon",
            ChainId::Xdai => "xdai",
            ChainId::Arbitrum => "arbitrum",
            ChainId::Linea => "linea",
            ChainId::Chiliz => "chiliz",
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "polygon" => Ok(ChainId::Polygon),
            "xdai" | "gnosis" => Ok(ChainId::Xdai),
            "arbitrum" => Ok(ChainId::Arbitrum),
            "linea" => Ok(ChainId::Linea),
            "chiliz" => Ok(ChainId::Chiliz),
            other => Err(ConfigError::UnknownChain(other.to_string())),
        }
    }
}

/// Where to find a chain's bets and when the protocol went live there.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChainConfig {
    /// The subgraph GraphQL endpoint.
    pub endpoint: String,
    /// Unix seconds of protocol inception; lower bound of the all-time window.
    pub start_timestamp: i64,
}

/// Controls how the paginated fetcher talks to a subgraph.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FetchSettings {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Optional cap on the number of pages per fetch. `None` keeps paging
    /// until the source returns a short page.
    #[serde(default)]
    pub max_pages: Option<u32>,
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_pages: None,
            request_timeout: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    #[serde(default)]
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fetch: FetchSettings::default(),
            logging: LoggingConfig::default(),
            chains: builtin_chains(),
        }
    }
}

impl Settings {
    /// Looks up a chain's configuration.
    pub fn chain(&self, chain: ChainId) -> Result<&ChainConfig, ConfigError> {
        self.chains
            .get(&chain)
            .ok_or_else(|| ConfigError::UnknownChain(chain.to_string()))
    }

    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch.page_size == 0 || self.fetch.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::ValidationError(format!(
                "fetch.page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.fetch.page_size
            )));
        }
        if self.fetch.max_pages == Some(0) {
            return Err(ConfigError::ValidationError(
                "fetch.max_pages must be at least 1 when set".to_string(),
            ));
        }
        for (chain, cfg) in &self.chains {
            if cfg.endpoint.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "chains.{chain}.endpoint must not be empty"
                )));
            }
            if cfg.start_timestamp < 0 {
                return Err(ConfigError::ValidationError(format!(
                    "chains.{chain}.start_timestamp must not be negative"
                )));
            }
        }
        Ok(())
    }
}

fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_log_level() -> String {
    "info".to_string()
}

/// The deployments known at build time.
pub fn builtin_chains() -> BTreeMap<ChainId, ChainConfig> {
    let chain = |endpoint: &str, start_timestamp: i64| ChainConfig {
        endpoint: endpoint.to_string(),
        start_timestamp,
    };
    BTreeMap::from([
        (
            ChainId::Polygon,
            chain(
                "https://thegraph.azuro.org/subgraphs/name/azuro-protocol/azuro-api-polygon-v3",
                1675209600,
            ),
        ),
        (
            ChainId::Xdai,
            chain(
                "https://thegraph.azuro.org/subgraphs/name/azuro-protocol/azuro-api-gnosis-v3",
                1654646400,
            ),
        ),
        (
            ChainId::Arbitrum,
            chain(
                "https://thegraph.azuro.org/subgraphs/name/azuro-protocol/azuro-api-arbitrum-one-v3",
                1686009600,
            ),
        ),
        (
            ChainId::Linea,
            chain(
                "https://thegraph.bookmaker.xyz/subgraphs/name/azuro-protocol/azuro-api-linea-v3",
                1691452800,
            ),
        ),
        (
            ChainId::Chiliz,
            chain(
                "https://thegraph.bookmaker.xyz/subgraphs/name/azuro-protocol/azuro-api-chiliz-v3",
                1716422400,
            ),
        ),
    ])
}
