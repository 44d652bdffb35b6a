use crate::error::EngineError;
use crate::window::ReportWindows;
use analytics::{AggregateAmounts, BetAggregator};
use api_client::{fetch_all_bets, BetSource};
use configuration::FetchSettings;
use core_types::{BetCategory, BetRecord, FeeReport, TimeWindow};
use std::sync::Arc;

/// Builds fee reports for one record source.
///
/// The reporter holds no state between calls and knows nothing about chains;
/// the caller picks the source and the inception timestamp.
pub struct FeeReporter {
    source: Arc<dyn BetSource>,
    fetch: FetchSettings,
    aggregator: BetAggregator,
}

impl FeeReporter {
    pub fn new(source: Arc<dyn BetSource>, fetch: FetchSettings) -> Self {
        Self {
            source,
            fetch,
            aggregator: BetAggregator::new(),
        }
    }

    /// Computes the daily and lifetime pool profit as of `report_timestamp`.
    ///
    /// Standard and live bets for both windows are fetched concurrently. The
    /// first failed fetch aborts the report and the remaining fetches are
    /// dropped, so a report is either complete or not produced at all.
    pub async fn build_report(
        &self,
        start_timestamp: i64,
        report_timestamp: i64,
    ) -> Result<FeeReport, EngineError> {
        let windows = ReportWindows::new(start_timestamp, report_timestamp)?;
        tracing::info!(
            report_timestamp,
            daily = %windows.daily,
            lifetime = %windows.lifetime,
            "Building fee report."
        );

        let (daily_standard, lifetime_standard, daily_live, lifetime_live) = tokio::try_join!(
            self.fetch(BetCategory::Standard, windows.daily),
            self.fetch(BetCategory::Standard, windows.lifetime),
            self.fetch(BetCategory::Live, windows.daily),
            self.fetch(BetCategory::Live, windows.lifetime),
        )?;

        let daily = self.aggregate("daily", merge(daily_standard, daily_live))?;
        let lifetime = self.aggregate("lifetime", merge(lifetime_standard, lifetime_live))?;

        let report = FeeReport::new(report_timestamp, daily.profit(), lifetime.profit());
        tracing::info!(
            daily_fees = %report.daily_fees,
            total_fees = %report.total_fees,
            "Fee report ready."
        );
        Ok(report)
    }

    async fn fetch(
        &self,
        category: BetCategory,
        window: TimeWindow,
    ) -> Result<Vec<BetRecord>, EngineError> {
        fetch_all_bets(self.source.as_ref(), category, window, &self.fetch)
            .await
            .map_err(|source| EngineError::Fetch {
                category,
                window,
                source,
            })
    }

    fn aggregate(
        &self,
        scope: &'static str,
        records: Vec<BetRecord>,
    ) -> Result<AggregateAmounts, EngineError> {
        self.aggregator
            .aggregate(&records)
            .map_err(|source| EngineError::Aggregation { scope, source })
    }
}

/// Pre-match and in-play bets count the same for fees, so the streams are
/// simply concatenated.
fn merge(mut standard: Vec<BetRecord>, live: Vec<BetRecord>) -> Vec<BetRecord> {
    standard.extend(live);
    standard
}
