use crate::common::errors::AnalysisError;

/// Relative strength index over a trailing window of daily changes.
///
/// Gains and losses are averaged with a plain mean over the last `period`
/// changes; the first value appears at index `period` (one change per day,
/// plus the seed day). A window with zero average loss saturates to 100,
/// all-flat windows included.
#[derive(Debug)]
pub struct RsiModel {
    period: usize,
    last_price: Option<f64>,
    changes: Vec<f64>,
}

impl RsiModel {
    pub fn new(period: usize) -> Result<Self, AnalysisError> {
        if period == 0 {
            return Err(AnalysisError::parameter("period", "must be at least 1"));
        }
        Ok(Self {
            period,
            last_price: None,
            changes: Vec::with_capacity(period),
        })
    }

    pub fn add(&mut self, price: f64) -> Option<f64> {
        let last_price = match self.last_price.replace(price) {
            Some(p) => p,
            None => return None,
        };

        self.changes.push(price - last_price);
        if self.changes.len() > self.period {
            self.changes.remove(0);
        }
        if self.changes.len() < self.period {
            return None;
        }

        let avg_gain =
            self.changes.iter().filter(|&&c| c > 0.0).sum::<f64>() / self.period as f64;
        let avg_loss =
            -self.changes.iter().filter(|&&c| c < 0.0).sum::<f64>() / self.period as f64;

        let rsi = if avg_loss == 0.0 {
            100.0
        } else {
            let rs = avg_gain / avg_loss;
            100.0 - 100.0 / (1.0 + rs)
        };
        Some(rsi.clamp(0.0, 100.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(prices: &[f64], period: usize) -> Vec<Option<f64>> {
        let mut model = RsiModel::new(period).unwrap();
        prices.iter().map(|&p| model.add(p)).collect()
    }

    #[test]
    fn test_warm_up_length() {
        let out = run(&[10.0, 11.0, 12.0, 11.0, 13.0, 14.0], 4);
        for v in &out[..4] {
            assert!(v.is_none());
        }
        assert!(out[4].is_some());
        assert!(out[5].is_some());
    }

    #[test]
    fn test_all_gains_saturates_high() {
        let prices: Vec<f64> = (1..=8).map(|i| i as f64).collect();
        let out = run(&prices, 7);
        assert_eq!(out[7], Some(100.0));
    }

    #[test]
    fn test_all_losses_saturates_low() {
        let prices: Vec<f64> = (1..=8).rev().map(|i| i as f64).collect();
        let out = run(&prices, 7);
        assert_eq!(out[7], Some(0.0));
    }

    #[test]
    fn test_flat_window_saturates_high() {
        let out = run(&[50.0, 50.0, 50.0, 50.0], 3);
        assert_eq!(out[3], Some(100.0));
    }

    #[test]
    fn test_balanced_window() {
        // changes: +2, -2 over a period of 2 -> rs = 1 -> rsi = 50
        let out = run(&[10.0, 12.0, 10.0], 2);
        assert_eq!(out[2], Some(50.0));
    }

    #[test]
    fn test_values_bounded() {
        let prices = [10.0, 12.0, 9.0, 14.0, 13.0, 13.5, 11.0, 16.0];
        for v in run(&prices, 3).into_iter().flatten() {
            assert!((0.0..=100.0).contains(&v));
        }
    }

    #[test]
    fn test_zero_period_rejected() {
        assert!(matches!(
            RsiModel::new(0),
            Err(AnalysisError::Parameter { param: "period", .. })
        ));
    }
}
