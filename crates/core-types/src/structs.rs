use crate::enums::BetResult;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single resolved bet as projected by the subgraph query.
///
/// Amounts and odds arrive as decimal strings; parsing them is the
/// aggregator's job, so the record is kept exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetRecord {
    pub amount: String,
    pub odds: String,
    #[serde(default)]
    pub result: Option<BetResult>,
}

impl BetRecord {
    pub fn new(amount: impl Into<String>, odds: impl Into<String>, result: BetResult) -> Self {
        Self {
            amount: amount.into(),
            odds: odds.into(),
            result: Some(result),
        }
    }

    pub fn is_won(&self) -> bool {
        self.result == Some(BetResult::Won)
    }
}

/// A closed interval of unix timestamps (seconds), inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    from: i64,
    to: i64,
}

impl TimeWindow {
    pub fn new(from: i64, to: i64) -> Result<Self, CoreError> {
        if from > to {
            return Err(CoreError::InvalidWindow { from, to });
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> i64 {
        self.from
    }

    pub fn to(&self) -> i64 {
        self.to
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        self.from <= timestamp && timestamp <= self.to
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.from, self.to)
    }
}

/// The fee figures produced for one chain at one point in time.
///
/// The protocol defines revenue as equal to fees (pool profit), so each pair
/// is filled from the same number. Monetary fields are decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeReport {
    pub timestamp: i64,
    pub daily_fees: String,
    pub daily_revenue: String,
    pub total_fees: String,
    pub total_revenue: String,
}

impl FeeReport {
    pub fn new(timestamp: i64, daily_profit: f64, total_profit: f64) -> Self {
        let daily = format_amount(daily_profit);
        let total = format_amount(total_profit);
        Self {
            timestamp,
            daily_fees: daily.clone(),
            daily_revenue: daily,
            total_fees: total.clone(),
            total_revenue: total,
        }
    }
}

/// Shortest round-trip decimal rendering, with negative zero folded into zero.
pub fn format_amount(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_rejects_inverted_bounds() {
        assert_eq!(
            TimeWindow::new(10, 5),
            Err(CoreError::InvalidWindow { from: 10, to: 5 })
        );
        let point = TimeWindow::new(7, 7).unwrap();
        assert!(point.contains(7));
        assert!(!point.contains(8));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let window = TimeWindow::new(100, 200).unwrap();
        assert!(window.contains(100));
        assert!(window.contains(200));
        assert!(!window.contains(99));
        assert!(!window.contains(201));
        assert_eq!(window.to_string(), "[100, 200]");
    }

    #[test]
    fn bet_record_deserializes_subgraph_shape() {
        let json = r#"[
            {"amount": "10.5", "odds": "1.92", "result": "Won"},
            {"amount": "3", "odds": "2.5", "result": "Lost"},
            {"amount": "1", "odds": "1.1", "result": null},
            {"amount": "2", "odds": "1.3"},
            {"amount": "4", "odds": "1.7", "result": "Canceled"}
        ]"#;
        let records: Vec<BetRecord> = serde_json::from_str(json).unwrap();

        assert_eq!(records[0], BetRecord::new("10.5", "1.92", BetResult::Won));
        assert!(records[0].is_won());
        assert_eq!(records[1].result, Some(BetResult::Lost));
        assert_eq!(records[2].result, None);
        assert_eq!(records[3].result, None);
        assert_eq!(records[4].result, Some(BetResult::Other));
        assert!(!records[4].is_won());
    }

    #[test]
    fn fee_report_mirrors_fees_into_revenue() {
        let report = FeeReport::new(1_700_000_123, -5.0, 1234.5);
        assert_eq!(report.daily_fees, "-5");
        assert_eq!(report.daily_fees, report.daily_revenue);
        assert_eq!(report.total_fees, "1234.5");
        assert_eq!(report.total_fees, report.total_revenue);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["timestamp"], 1_700_000_123);
        assert_eq!(json["dailyFees"], "-5");
        assert_eq!(json["totalRevenue"], "1234.5");
    }

    #[test]
    fn format_amount_folds_negative_zero() {
        assert_eq!(format_amount(-0.0), "0");
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(0.1 + 0.2), "0.30000000000000004");
    }
}
