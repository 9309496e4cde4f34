use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::errors::AnalysisError;

/// Calendar date of one trading day.
///
/// Daily series carry at most one record per date; comparisons and ordering
/// follow the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TradeDate(NaiveDate);

impl TradeDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parses a date string. Supports "YYYY-MM-DD" and "YYYYMMDD".
    pub fn parse(s: &str) -> Result<Self, AnalysisError> {
        let s = s.trim();
        let parsed = if s.contains('-') {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
        } else {
            NaiveDate::parse_from_str(s, "%Y%m%d")
        };
        parsed
            .map(Self)
            .map_err(|e| AnalysisError::SourceFormat(format!("bad date {:?}: {}", s, e)))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn to_str(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for TradeDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dashed() {
        let d = TradeDate::parse("2024-03-01").unwrap();
        assert_eq!(d.to_str(), "2024-03-01");
    }

    #[test]
    fn test_parse_compact() {
        let d = TradeDate::parse("20240301").unwrap();
        assert_eq!(d, TradeDate::parse("2024-03-01").unwrap());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(TradeDate::parse("not-a-date").is_err());
        assert!(TradeDate::parse("2024-13-01").is_err());
    }

    #[test]
    fn test_ordering() {
        let a = TradeDate::parse("2024-03-01").unwrap();
        let b = TradeDate::parse("2024-03-04").unwrap();
        assert!(a < b);
    }
}
