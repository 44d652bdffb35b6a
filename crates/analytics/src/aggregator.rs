use crate::amounts::AggregateAmounts;
use crate::error::AnalyticsError;
use core_types::BetRecord;

/// A stateless calculator for the wagered and won totals of a bet set.
#[derive(Debug, Default, Clone, Copy)]
pub struct BetAggregator {}

impl BetAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sums stakes over all `records` and payouts over the winning ones.
    ///
    /// A winner's payout is stake × odds. Losing, voided and unsettled bets
    /// only contribute their stake, and their odds are never read.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::MalformedNumber` for the first amount (or
    /// winner's odds) that is not a finite decimal. No partial totals are
    /// returned.
    pub fn aggregate(&self, records: &[BetRecord]) -> Result<AggregateAmounts, AnalyticsError> {
        let totals = records
            .iter()
            .try_fold(AggregateAmounts::default(), |acc, record| {
                Ok::<_, AnalyticsError>(acc + Self::contribution(record)?)
            })?;

        tracing::debug!(
            bets = records.len(),
            total_wagered = totals.total_wagered,
            total_won = totals.total_won,
            "Aggregated bet amounts."
        );
        Ok(totals)
    }

    fn contribution(record: &BetRecord) -> Result<AggregateAmounts, AnalyticsError> {
        let amount = parse_decimal("amount", &record.amount)?;
        let won = if record.is_won() {
            amount * parse_decimal("odds", &record.odds)?
        } else {
            0.0
        };
        Ok(AggregateAmounts {
            total_wagered: amount,
            total_won: won,
        })
    }
}

fn parse_decimal(field: &'static str, value: &str) -> Result<f64, AnalyticsError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AnalyticsError::MalformedNumber {
            field,
            value: value.to_string(),
        })
}
