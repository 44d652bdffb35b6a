use configuration::ChainId;
use core_types::{BetCategory, TimeWindow};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] configuration::error::ConfigError),

    #[error("Failed to create the subgraph client: {0}")]
    Client(#[source] api_client::error::ApiError),

    #[error("Failed to fetch {category} bets for window {window}: {source}")]
    Fetch {
        category: BetCategory,
        window: TimeWindow,
        #[source]
        source: api_client::error::ApiError,
    },

    #[error("Failed to aggregate {scope} bets: {source}")]
    Aggregation {
        scope: &'static str,
        #[source]
        source: analytics::AnalyticsError,
    },

    #[error("Invalid report window: {0}")]
    Window(#[from] core_types::CoreError),

    #[error("Timestamp {0} is outside the supported date range")]
    TimestampOutOfRange(i64),

    #[error("Report for chain '{chain}' failed: {source}")]
    Chain {
        chain: ChainId,
        #[source]
        source: Box<EngineError>,
    },
}
