use serde::Serialize;

use crate::common::errors::AnalysisError;
use crate::common::trade_date::TradeDate;

/// One daily record: trading date and closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: TradeDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: TradeDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Time-ordered closing-price series for one ticker.
///
/// Construction validates the whole sequence: dates strictly ascending (no
/// duplicates), closes finite and strictly positive. Calendar gaps between
/// records (weekends, holidays) are legal and preserved as-is. The empty
/// series is valid.
///
/// Once built the series is read-only; every derived series is computed
/// from it and aligned index-for-index with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Result<Self, AnalysisError> {
        for (i, p) in points.iter().enumerate() {
            if !p.close.is_finite() {
                return Err(AnalysisError::data_integrity(
                    i,
                    format!("close price is not finite ({})", p.close),
                ));
            }
            if p.close <= 0.0 {
                return Err(AnalysisError::data_integrity(
                    i,
                    format!("close price must be positive, got {}", p.close),
                ));
            }
            if i > 0 && p.date <= points[i - 1].date {
                return Err(AnalysisError::data_integrity(
                    i,
                    format!(
                        "dates must be strictly ascending: {} follows {}",
                        p.date,
                        points[i - 1].date
                    ),
                ));
            }
        }
        Ok(Self { points })
    }

    pub fn empty() -> Self {
        Self { points: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PricePoint> {
        self.points.get(index)
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PricePoint> {
        self.points.iter()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn dates(&self) -> Vec<TradeDate> {
        self.points.iter().map(|p| p.date).collect()
    }
}
