//! Analysis parameters shared by every report

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Default look-back window for "last 12 months" reports
pub const DEFAULT_WINDOW_DAYS: u32 = 365;

/// Default size of the top-N policyholder ranking
pub const DEFAULT_TOP_N: usize = 10;

/// Configuration for a report run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Reference "current date" for ages and time windows
    pub as_of: NaiveDate,

    /// Length of the recent-claims window in days
    pub window_days: u32,

    /// Number of policyholders kept by the approved-amount ranking
    pub top_n: usize,
}

impl AnalysisConfig {
    /// Configuration with default window and ranking size
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            window_days: DEFAULT_WINDOW_DAYS,
            top_n: DEFAULT_TOP_N,
        }
    }

    /// First day of the recent-claims window
    pub fn window_start(&self) -> NaiveDate {
        self.as_of
            .checked_sub_days(Days::new(u64::from(self.window_days)))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Whether `date` lies in `[as_of - window_days, as_of]`
    pub fn in_window(&self, date: NaiveDate) -> bool {
        date >= self.window_start() && date <= self.as_of
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_spans_leap_day() {
        let config = AnalysisConfig::new(date(2024, 6, 30));
        // 365 days back across 2024-02-29
        assert_eq!(config.window_start(), date(2023, 7, 1));
        assert!(config.in_window(date(2023, 7, 1)));
        assert!(!config.in_window(date(2023, 6, 30)));
        assert!(config.in_window(date(2024, 6, 30)));
        assert!(!config.in_window(date(2024, 7, 1)));
    }

    #[test]
    fn test_custom_window() {
        let config = AnalysisConfig {
            window_days: 30,
            ..AnalysisConfig::new(date(2024, 3, 1))
        };
        assert_eq!(config.window_start(), date(2024, 1, 31));
    }
}
