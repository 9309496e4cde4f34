use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use crate::common::errors::AnalysisError;
use crate::common::trade_date::TradeDate;
use crate::math::returns::ReturnsModel;
use crate::series::price_series::PriceSeries;

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Holding {
    pub ticker: String,
    pub weight: f64,
}

/// Weighted basket of tickers.
///
/// The daily portfolio return is the weight-sum of each holding's return,
/// aligned on the first holding's trading dates; a holding with no record
/// for a date contributes zero that day.
#[derive(Debug, Clone, Default)]
pub struct Portfolio {
    holdings: Vec<Holding>,
}

/// Summary statistics of the weighted return line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioReport {
    /// Compounded return over the whole window, as a fraction.
    pub total_return: f64,
    /// Return annualized over 252 trading days.
    pub annual_return: f64,
    /// Annualized population volatility of the daily returns.
    pub volatility: f64,
    /// Annual return over volatility; zero when volatility is zero.
    pub sharpe_ratio: f64,
    /// Most negative peak-relative decline of the compounded curve.
    pub max_drawdown: f64,
    /// Per-holding share of the total return; percentages when the total
    /// is positive, raw weighted returns otherwise.
    pub contributions: Vec<(String, f64)>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_holding(
        &mut self,
        ticker: impl Into<String>,
        weight: f64,
    ) -> Result<(), AnalysisError> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(AnalysisError::parameter(
                "weight",
                format!("holding weight must be finite and positive, got {}", weight),
            ));
        }
        self.holdings.push(Holding {
            ticker: ticker.into(),
            weight,
        });
        Ok(())
    }

    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn analyze(
        &self,
        data: &HashMap<String, PriceSeries>,
    ) -> Result<PortfolioReport, AnalysisError> {
        if self.holdings.is_empty() {
            return Err(AnalysisError::EmptyInput("no holdings in portfolio".into()));
        }

        // fractional return per date, per ticker
        let mut returns_by_ticker = HashMap::new();
        for holding in &self.holdings {
            match data.get(&holding.ticker) {
                Some(series) if !series.is_empty() => {
                    returns_by_ticker
                        .insert(holding.ticker.clone(), dated_returns(series)?);
                }
                _ => warn!(ticker = %holding.ticker, "no data for holding"),
            }
        }

        // timeline of the first holding that has data
        let timeline = self
            .holdings
            .iter()
            .find_map(|h| returns_by_ticker.get(&h.ticker))
            .map(|rets| rets.iter().map(|(d, _)| *d).collect::<Vec<_>>())
            .unwrap_or_default();
        if timeline.is_empty() {
            return Err(AnalysisError::EmptyInput(
                "no usable return history in portfolio".into(),
            ));
        }

        let lookup: HashMap<&str, HashMap<_, f64>> = returns_by_ticker
            .iter()
            .map(|(t, rets)| (t.as_str(), rets.iter().copied().collect()))
            .collect();

        let portfolio_returns: Vec<f64> = timeline
            .iter()
            .map(|date| {
                self.holdings
                    .iter()
                    .map(|h| {
                        lookup
                            .get(h.ticker.as_str())
                            .and_then(|m| m.get(date))
                            .map_or(0.0, |r| r * h.weight)
                    })
                    .sum()
            })
            .collect();

        let total_return = compound(&portfolio_returns);
        let annual_return =
            (1.0 + total_return).powf(TRADING_DAYS_PER_YEAR / portfolio_returns.len() as f64)
                - 1.0;
        let volatility = population_std(&portfolio_returns) * TRADING_DAYS_PER_YEAR.sqrt();
        let sharpe_ratio = if volatility > 0.0 {
            annual_return / volatility
        } else {
            0.0
        };

        Ok(PortfolioReport {
            total_return,
            annual_return,
            volatility,
            sharpe_ratio,
            max_drawdown: max_drawdown(&portfolio_returns),
            contributions: self.contributions(&returns_by_ticker),
        })
    }

    fn contributions(
        &self,
        returns_by_ticker: &HashMap<String, Vec<(TradeDate, f64)>>,
    ) -> Vec<(String, f64)> {
        let mut contributions = Vec::new();
        let mut total = 0.0;
        for holding in &self.holdings {
            if let Some(rets) = returns_by_ticker.get(&holding.ticker) {
                let only: Vec<f64> = rets.iter().map(|(_, r)| *r).collect();
                let weighted = compound(&only) * holding.weight;
                contributions.push((holding.ticker.clone(), weighted));
                total += weighted;
            }
        }
        if total > 0.0 {
            for (_, c) in contributions.iter_mut() {
                *c = *c / total * 100.0;
            }
        }
        contributions
    }
}

fn dated_returns(series: &PriceSeries) -> Result<Vec<(TradeDate, f64)>, AnalysisError> {
    let mut model = ReturnsModel::new();
    let mut out = Vec::with_capacity(series.len().saturating_sub(1));
    for point in series.iter() {
        if let Some(r) = model.add(point.close)? {
            out.push((point.date, r));
        }
    }
    Ok(out)
}

fn compound(returns: &[f64]) -> f64 {
    returns.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0
}

fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn max_drawdown(returns: &[f64]) -> f64 {
    let mut curve = 1.0;
    let mut peak: f64 = 1.0;
    let mut worst = 0.0f64;
    for r in returns {
        curve *= 1.0 + r;
        peak = peak.max(curve);
        worst = worst.min((curve - peak) / peak);
    }
    worst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::price_series::PricePoint;
    use chrono::NaiveDate;

    fn series(prices: &[f64]) -> PriceSeries {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                PricePoint::new(
                    TradeDate::new(base + chrono::Duration::days(i as i64)),
                    close,
                )
            })
            .collect();
        PriceSeries::new(points).unwrap()
    }

    #[test]
    fn test_single_holding_statistics() {
        let mut portfolio = Portfolio::new();
        portfolio.add_holding("T", 1.0).unwrap();
        let mut data = HashMap::new();
        // returns: +0.1, -0.5, +0.2
        data.insert("T".to_string(), series(&[100.0, 110.0, 55.0, 66.0]));

        let report = portfolio.analyze(&data).unwrap();
        assert!((report.total_return - (-0.34)).abs() < 1e-9);
        assert!((report.max_drawdown - (-0.5)).abs() < 1e-9);
        assert!(report.annual_return < 0.0);
        assert!(report.volatility > 0.0);
        assert!(report.sharpe_ratio < 0.0);
        // negative total keeps contributions as raw weighted returns
        assert_eq!(report.contributions.len(), 1);
        assert!((report.contributions[0].1 - (-0.34)).abs() < 1e-9);
    }

    #[test]
    fn test_equal_split_matches_single() {
        let prices = [100.0, 102.0, 101.0, 105.0];
        let mut solo = Portfolio::new();
        solo.add_holding("A", 1.0).unwrap();
        let mut split = Portfolio::new();
        split.add_holding("A", 0.5).unwrap();
        split.add_holding("B", 0.5).unwrap();

        let mut solo_data = HashMap::new();
        solo_data.insert("A".to_string(), series(&prices));
        let mut split_data = HashMap::new();
        split_data.insert("A".to_string(), series(&prices));
        split_data.insert("B".to_string(), series(&prices));

        let solo_report = solo.analyze(&solo_data).unwrap();
        let split_report = split.analyze(&split_data).unwrap();
        assert!((solo_report.total_return - split_report.total_return).abs() < 1e-12);
        assert!((solo_report.volatility - split_report.volatility).abs() < 1e-12);
    }

    #[test]
    fn test_positive_total_normalizes_contributions() {
        let mut portfolio = Portfolio::new();
        portfolio.add_holding("A", 0.5).unwrap();
        portfolio.add_holding("B", 0.5).unwrap();
        let mut data = HashMap::new();
        data.insert("A".to_string(), series(&[100.0, 110.0]));
        data.insert("B".to_string(), series(&[100.0, 110.0]));

        let report = portfolio.analyze(&data).unwrap();
        assert!(report.total_return > 0.0);
        let sum: f64 = report.contributions.iter().map(|(_, c)| c).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert!((report.contributions[0].1 - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_holding_contributes_nothing() {
        let mut portfolio = Portfolio::new();
        portfolio.add_holding("A", 0.5).unwrap();
        portfolio.add_holding("GONE", 0.5).unwrap();
        let mut data = HashMap::new();
        data.insert("A".to_string(), series(&[100.0, 110.0, 121.0]));

        let report = portfolio.analyze(&data).unwrap();
        // half the weight sits idle: each day returns 0.05 instead of 0.10
        assert!((report.total_return - (1.05f64 * 1.05 - 1.0)).abs() < 1e-9);
        assert_eq!(report.contributions.len(), 1);
    }

    #[test]
    fn test_rising_curve_has_no_drawdown() {
        let mut portfolio = Portfolio::new();
        portfolio.add_holding("A", 1.0).unwrap();
        let mut data = HashMap::new();
        data.insert("A".to_string(), series(&[100.0, 101.0, 102.0, 103.0]));
        let report = portfolio.analyze(&data).unwrap();
        assert_eq!(report.max_drawdown, 0.0);
    }

    #[test]
    fn test_empty_portfolio_is_an_error() {
        let portfolio = Portfolio::new();
        let err = portfolio.analyze(&HashMap::new()).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyInput(_)));
    }

    #[test]
    fn test_bad_weight_rejected() {
        let mut portfolio = Portfolio::new();
        assert!(portfolio.add_holding("A", 0.0).is_err());
        assert!(portfolio.add_holding("A", -0.5).is_err());
        assert!(portfolio.add_holding("A", f64::NAN).is_err());
    }
}
