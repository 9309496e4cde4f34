use serde::Serialize;

use crate::common::errors::AnalysisError;

/// One Bollinger observation: middle band plus the ±k·σ envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BollMetric {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Bollinger bands over a trailing window of closes.
///
/// Middle band is the window mean, envelope is k times the population
/// standard deviation (divide by N) of the same window. Warm-up matches the
/// moving average: nothing is emitted until the window is full.
#[derive(Debug)]
pub struct BollModel {
    window: usize,
    k: f64,
    prices: Vec<f64>,
}

impl BollModel {
    pub fn new(window: usize, k: f64) -> Result<Self, AnalysisError> {
        if window == 0 {
            return Err(AnalysisError::parameter("window", "must be at least 1"));
        }
        if !k.is_finite() || k < 0.0 {
            return Err(AnalysisError::parameter(
                "k",
                format!("band width multiplier must be finite and >= 0, got {}", k),
            ));
        }
        Ok(Self {
            window,
            k,
            prices: Vec::with_capacity(window),
        })
    }

    pub fn add(&mut self, price: f64) -> Option<BollMetric> {
        self.prices.push(price);
        if self.prices.len() > self.window {
            self.prices.remove(0);
        }
        if self.prices.len() < self.window {
            return None;
        }

        let middle = self.prices.iter().sum::<f64>() / self.window as f64;
        let variance = self
            .prices
            .iter()
            .map(|&x| (x - middle).powi(2))
            .sum::<f64>()
            / self.window as f64;
        let std_dev = variance.sqrt();

        Some(BollMetric {
            upper: middle + self.k * std_dev,
            middle,
            lower: middle - self.k * std_dev,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(prices: &[f64], window: usize, k: f64) -> Vec<Option<BollMetric>> {
        let mut model = BollModel::new(window, k).unwrap();
        prices.iter().map(|&p| model.add(p)).collect()
    }

    #[test]
    fn test_warm_up_matches_sma() {
        let out = run(&[10.0, 20.0, 30.0], 3, 2.0);
        assert!(out[0].is_none());
        assert!(out[1].is_none());
        assert!(out[2].is_some());
    }

    #[test]
    fn test_known_window() {
        // window [10, 20, 30]: mean 20, population variance 200/3
        let out = run(&[10.0, 20.0, 30.0], 3, 2.0);
        let m = out[2].unwrap();
        let std_dev = (200.0f64 / 3.0).sqrt();
        assert!((m.middle - 20.0).abs() < 1e-9);
        assert!((m.upper - (20.0 + 2.0 * std_dev)).abs() < 1e-9);
        assert!((m.lower - (20.0 - 2.0 * std_dev)).abs() < 1e-9);
    }

    #[test]
    fn test_band_ordering() {
        let prices = [10.0, 12.0, 15.0, 13.0, 16.0, 18.0, 17.0];
        for m in run(&prices, 3, 2.0).into_iter().flatten() {
            assert!(m.upper >= m.middle);
            assert!(m.middle >= m.lower);
        }
    }

    #[test]
    fn test_flat_window_collapses_bands() {
        let out = run(&[5.0, 5.0, 5.0], 3, 2.0);
        let m = out[2].unwrap();
        assert_eq!(m.upper, 5.0);
        assert_eq!(m.middle, 5.0);
        assert_eq!(m.lower, 5.0);
    }

    #[test]
    fn test_bad_parameters_rejected() {
        assert!(BollModel::new(0, 2.0).is_err());
        assert!(BollModel::new(20, -1.0).is_err());
        assert!(BollModel::new(20, f64::NAN).is_err());
    }
}
