//! # Azuro Fees Engine
//!
//! Turns a chain's subgraph into a [`FeeReport`]: it derives the daily and
//! lifetime windows, fans out the four bet fetches, merges the pre-match and
//! live streams and reduces each window to a pool profit.
//!
//! The engine never decides when it runs. A scheduler (or the CLI) calls
//! [`run_chain`] / [`run_all_chains`] with an as-of timestamp and owns any retry.

use api_client::SubgraphClient;
use configuration::{ChainId, Settings};
use core_types::FeeReport;
use futures::future::join_all;
use std::sync::Arc;
use tracing::Instrument;

pub mod error;
pub mod reporter;
pub mod window;

pub use error::EngineError;
pub use reporter::FeeReporter;
pub use window::{start_of_utc_day, ReportWindows};

/// How the published figures are defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Methodology {
    pub fees: &'static str,
    pub revenue: &'static str,
}

pub const METHODOLOGY: Methodology = Methodology {
    fees: "Total pools profits (equals total bets amount minus total won bets amount)",
    revenue: "Total pools profits (equals total bets amount minus total won bets amount)",
};

/// Builds the report for one configured chain as of `timestamp`.
pub async fn run_chain(
    settings: &Settings,
    chain: ChainId,
    timestamp: i64,
) -> Result<FeeReport, EngineError> {
    build_for_chain(settings, chain, timestamp)
        .await
        .map_err(|source| EngineError::Chain {
            chain,
            source: Box::new(source),
        })
}

/// Builds reports for every configured chain concurrently.
///
/// Chains are independent: each entry carries its own outcome and one chain
/// failing never affects another.
pub async fn run_all_chains(
    settings: &Settings,
    timestamp: i64,
) -> Vec<(ChainId, Result<FeeReport, EngineError>)> {
    let chains: Vec<ChainId> = settings.chains.keys().copied().collect();
    run_chains(settings, &chains, timestamp).await
}

/// Builds reports for the given chains concurrently, preserving their order.
pub async fn run_chains(
    settings: &Settings,
    chains: &[ChainId],
    timestamp: i64,
) -> Vec<(ChainId, Result<FeeReport, EngineError>)> {
    let tasks = chains
        .iter()
        .map(|&chain| async move { (chain, run_chain(settings, chain, timestamp).await) });
    join_all(tasks).await
}

async fn build_for_chain(
    settings: &Settings,
    chain: ChainId,
    timestamp: i64,
) -> Result<FeeReport, EngineError> {
    let chain_config = settings.chain(chain)?;
    let client = SubgraphClient::new(chain_config.endpoint.clone(), &settings.fetch)
        .map_err(EngineError::Client)?;
    tracing::debug!(%chain, endpoint = client.endpoint(), "Using subgraph endpoint.");

    let reporter = FeeReporter::new(Arc::new(client), settings.fetch.clone());
    reporter
        .build_report(chain_config.start_timestamp, timestamp)
        .instrument(tracing::info_span!("chain", %chain))
        .await
}
