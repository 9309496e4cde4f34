use serde::Serialize;
use strum_macros::{Display, EnumString};
use tracing::warn;

use crate::analyzer::analyzer::Analyzer;
use crate::common::errors::AnalysisError;
use crate::config::analysis_config::AnalysisConfig;
use crate::series::price_series::PriceSeries;

/// Momentum reading of the latest RSI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
pub enum RsiStatus {
    #[strum(serialize = "OVERSOLD")]
    Oversold,
    #[strum(serialize = "NEUTRAL")]
    Neutral,
    #[strum(serialize = "OVERBOUGHT")]
    Overbought,
}

impl RsiStatus {
    /// Classic 30/70 thresholds; an undefined RSI reads as neutral.
    pub fn from_rsi(rsi: Option<f64>) -> Self {
        match rsi {
            Some(v) if v < 30.0 => Self::Oversold,
            Some(v) if v > 70.0 => Self::Overbought,
            _ => Self::Neutral,
        }
    }
}

/// One ticker's side of a comparison: headline metrics plus the composite
/// score used for ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerSummary {
    pub ticker: String,
    pub start_price: f64,
    pub current_price: f64,
    pub total_change_pct: f64,
    pub sma_current: Option<f64>,
    pub rsi_current: Option<f64>,
    pub rsi_status: RsiStatus,
    pub volatility_pct: Option<f64>,
    pub max_profit: f64,
    pub score: f64,
}

/// Composite ranking score.
///
/// Weights: 3x total change (+10 above 20%), -2x volatility (-5 above 5%),
/// +2x max profit, RSI status bonus (+10 neutral, +5 oversold, -10
/// overbought), +5 for an RSI inside [30, 70].
pub fn score(summary: &TickerSummary) -> f64 {
    let mut score = summary.total_change_pct * 3.0;
    if summary.total_change_pct > 20.0 {
        score += 10.0;
    }

    if let Some(vol) = summary.volatility_pct {
        score -= vol * 2.0;
        if vol > 5.0 {
            score -= 5.0;
        }
    }

    score += summary.max_profit * 2.0;

    score += match summary.rsi_status {
        RsiStatus::Neutral => 10.0,
        RsiStatus::Oversold => 5.0,
        RsiStatus::Overbought => -10.0,
    };

    if let Some(rsi) = summary.rsi_current {
        if (30.0..=70.0).contains(&rsi) {
            score += 5.0;
        }
    }

    score
}

/// Analyzes every ticker with the same parameters and ranks the results,
/// best score first. Empty series are skipped with a warning, matching the
/// way unavailable tickers are dropped from a comparison.
pub fn compare(
    inputs: &[(String, PriceSeries)],
    config: &AnalysisConfig,
) -> Result<Vec<TickerSummary>, AnalysisError> {
    let analyzer = Analyzer::new(config.clone())?;
    let mut summaries = Vec::with_capacity(inputs.len());

    for (ticker, series) in inputs {
        if series.is_empty() {
            warn!(ticker = %ticker, "skipping ticker with no data");
            continue;
        }
        let report = analyzer.analyze(series)?;

        let start_price = series.first().unwrap().close;
        let current_price = series.last().unwrap().close;
        let total_change_pct = (current_price / start_price - 1.0) * 100.0;

        let rsi_current = report.rsi.last().copied().flatten();
        let mut summary = TickerSummary {
            ticker: ticker.clone(),
            start_price,
            current_price,
            total_change_pct,
            sma_current: report.sma.last().copied().flatten(),
            rsi_current,
            rsi_status: RsiStatus::from_rsi(rsi_current),
            volatility_pct: volatility_pct(&report.returns),
            max_profit: report.max_profit,
            score: 0.0,
        };
        summary.score = score(&summary);
        summaries.push(summary);
    }

    summaries.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(summaries)
}

/// Highest-scoring summary of an already-ranked comparison.
pub fn best(summaries: &[TickerSummary]) -> Option<&TickerSummary> {
    summaries.first()
}

/// Population standard deviation of the defined daily returns, in percent.
fn volatility_pct(returns: &[Option<f64>]) -> Option<f64> {
    let defined: Vec<f64> = returns.iter().copied().flatten().collect();
    if defined.is_empty() {
        return None;
    }
    let mean = defined.iter().sum::<f64>() / defined.len() as f64;
    let variance =
        defined.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / defined.len() as f64;
    Some(variance.sqrt() * 100.0)
}
