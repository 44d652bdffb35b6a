use crate::error::EngineError;
use chrono::DateTime;
use core_types::TimeWindow;

pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Unix seconds of 00:00:00 UTC on the day containing `timestamp`.
pub fn start_of_utc_day(timestamp: i64) -> Result<i64, EngineError> {
    let datetime =
        DateTime::from_timestamp(timestamp, 0).ok_or(EngineError::TimestampOutOfRange(timestamp))?;
    let midnight = datetime
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .ok_or(EngineError::TimestampOutOfRange(timestamp))?;
    Ok(midnight.and_utc().timestamp())
}

/// The two cohorts a report is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindows {
    /// The 24 hours ending at the start of the report day.
    pub daily: TimeWindow,
    /// Protocol inception up to the start of the report day.
    pub lifetime: TimeWindow,
}

impl ReportWindows {
    /// Derives both windows for a report requested at `report_timestamp`.
    ///
    /// Fails when the report day starts before `start_timestamp`, since the
    /// lifetime window would then be inverted.
    pub fn new(start_timestamp: i64, report_timestamp: i64) -> Result<Self, EngineError> {
        let today_start = start_of_utc_day(report_timestamp)?;
        Ok(Self {
            daily: TimeWindow::new(today_start - SECONDS_PER_DAY, today_start)?,
            lifetime: TimeWindow::new(start_timestamp, today_start)?,
        })
    }
}
