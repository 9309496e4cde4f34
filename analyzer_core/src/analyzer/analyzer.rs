use crate::analyzer::report::AnalysisReport;
use crate::common::errors::AnalysisError;
use crate::config::analysis_config::AnalysisConfig;
use crate::math::{
    boll::BollModel, max_profit::MaxProfitModel, returns::ReturnsModel, rsi::RsiModel,
    runs::RunTracker, sma::SmaModel,
};
use crate::series::price_series::PriceSeries;

/// Drives every metric model over a price series in one pass.
///
/// The analyzer owns only configuration; `analyze` never mutates its input
/// and carries no state between calls, so one instance can serve any number
/// of series.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Runs every metric over `series` and bundles the aligned results.
    ///
    /// Parameter validation happens before the first price is touched; an
    /// empty series produces an empty report rather than an error.
    pub fn analyze(&self, series: &PriceSeries) -> Result<AnalysisReport, AnalysisError> {
        let mut sma_model = SmaModel::new(self.config.sma_window)?;
        let mut returns_model = ReturnsModel::new();
        let mut rsi_model = RsiModel::new(self.config.rsi_period)?;
        let mut boll_model = BollModel::new(self.config.boll_period, self.config.boll_k)?;
        let mut run_tracker = RunTracker::new();
        let mut profit_model = MaxProfitModel::new();

        let n = series.len();
        let mut sma = Vec::with_capacity(n);
        let mut returns = Vec::with_capacity(n);
        let mut rsi = Vec::with_capacity(n);
        let mut boll = Vec::with_capacity(n);

        for point in series.iter() {
            let close = point.close;
            sma.push(sma_model.add(close));
            returns.push(returns_model.add(close)?);
            rsi.push(rsi_model.add(close));
            boll.push(boll_model.add(close));
            run_tracker.add(close);
            profit_model.add(close);
        }

        Ok(AnalysisReport {
            dates: series.dates(),
            closes: series.closes(),
            sma,
            returns,
            rsi,
            boll,
            runs: run_tracker.finish(),
            max_profit: profit_model.total(),
        })
    }
}
