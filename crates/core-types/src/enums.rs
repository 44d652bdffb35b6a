use serde::{Deserialize, Serialize};
use std::fmt;

/// The settled outcome of a bet, as recorded by the subgraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetResult {
    Won,
    Lost,
    /// Any outcome the indexer may report that we do not account for separately.
    #[serde(other)]
    Other,
}

/// Selects one of the two parallel record streams: pre-match or in-play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetCategory {
    Standard,
    Live,
}

impl fmt::Display for BetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetCategory::Standard => f.write_str("standard"),
            BetCategory::Live => f.write_str("live"),
        }
    }
}
