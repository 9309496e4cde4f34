use serde::Serialize;

use crate::common::trade_date::TradeDate;
use crate::math::boll::BollMetric;
use crate::math::runs::RunReport;

/// Everything one analysis pass produces for a series.
///
/// Derived series share the input's length and indexing; `None` marks the
/// warm-up prefix where a window has not filled yet. Two passes over the
/// same series produce equal reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub dates: Vec<TradeDate>,
    pub closes: Vec<f64>,
    pub sma: Vec<Option<f64>>,
    pub returns: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub boll: Vec<Option<BollMetric>>,
    pub runs: RunReport,
    pub max_profit: f64,
}

/// One flattened row of the report: a date and every metric for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub date: TradeDate,
    pub close: f64,
    pub sma: Option<f64>,
    pub daily_return: Option<f64>,
    pub rsi: Option<f64>,
    pub boll_upper: Option<f64>,
    pub boll_middle: Option<f64>,
    pub boll_lower: Option<f64>,
}

impl AnalysisReport {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Flat table view: one row per date, one column per metric.
    pub fn rows(&self) -> Vec<MetricRow> {
        (0..self.len())
            .map(|i| {
                let boll = self.boll[i];
                MetricRow {
                    date: self.dates[i],
                    close: self.closes[i],
                    sma: self.sma[i],
                    daily_return: self.returns[i],
                    rsi: self.rsi[i],
                    boll_upper: boll.map(|b| b.upper),
                    boll_middle: boll.map(|b| b.middle),
                    boll_lower: boll.map(|b| b.lower),
                }
            })
            .collect()
    }
}
