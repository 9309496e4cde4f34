use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::errors::AnalysisError;

fn default_sma_window() -> usize {
    5
}
fn default_rsi_period() -> usize {
    14
}
fn default_boll_period() -> usize {
    20
}
fn default_boll_k() -> f64 {
    2.0
}
fn default_min_run_len() -> usize {
    2
}

/// Analysis parameters.
///
/// Loadable from a JSON file where any subset of keys may be present;
/// missing keys fall back to the defaults and unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Simple moving average window.
    #[serde(default = "default_sma_window")]
    pub sma_window: usize,

    /// RSI trailing-change window.
    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    /// Bollinger band window.
    #[serde(default = "default_boll_period")]
    pub boll_period: usize,

    /// Bollinger band width in standard deviations.
    #[serde(default = "default_boll_k")]
    pub boll_k: f64,

    /// Shortest run worth reporting as a highlight.
    #[serde(default = "default_min_run_len")]
    pub min_run_len: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sma_window: default_sma_window(),
            rsi_period: default_rsi_period(),
            boll_period: default_boll_period(),
            boll_k: default_boll_k(),
            min_run_len: default_min_run_len(),
        }
    }
}

impl AnalysisConfig {
    /// Loads config from a JSON file; a missing file means defaults.
    pub fn from_file(path: &Path) -> Result<Self, AnalysisError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::SourceFormat(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, AnalysisError> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| AnalysisError::SourceFormat(format!("bad config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.sma_window == 0 {
            return Err(AnalysisError::parameter("sma_window", "must be at least 1"));
        }
        if self.rsi_period == 0 {
            return Err(AnalysisError::parameter("rsi_period", "must be at least 1"));
        }
        if self.boll_period == 0 {
            return Err(AnalysisError::parameter("boll_period", "must be at least 1"));
        }
        if !self.boll_k.is_finite() || self.boll_k < 0.0 {
            return Err(AnalysisError::parameter(
                "boll_k",
                format!("must be finite and >= 0, got {}", self.boll_k),
            ));
        }
        Ok(())
    }
}
