use crate::common::errors::AnalysisError;

/// Simple moving average over a trailing window of closes.
///
/// `add` returns `None` until `window` prices have been seen; a window
/// larger than the series therefore yields an all-`None` output rather
/// than an error.
#[derive(Debug)]
pub struct SmaModel {
    window: usize,
    prices: Vec<f64>,
}

impl SmaModel {
    pub fn new(window: usize) -> Result<Self, AnalysisError> {
        if window == 0 {
            return Err(AnalysisError::parameter("window", "must be at least 1"));
        }
        Ok(Self {
            window,
            prices: Vec::with_capacity(window),
        })
    }

    pub fn add(&mut self, price: f64) -> Option<f64> {
        self.prices.push(price);
        if self.prices.len() > self.window {
            self.prices.remove(0);
        }

        if self.prices.len() == self.window {
            Some(self.prices.iter().sum::<f64>() / self.window as f64)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(prices: &[f64], window: usize) -> Vec<Option<f64>> {
        let mut model = SmaModel::new(window).unwrap();
        prices.iter().map(|&p| model.add(p)).collect()
    }

    #[test]
    fn test_warm_up_prefix() {
        let out = run(&[10.0, 20.0, 30.0], 3);
        assert_eq!(out, vec![None, None, Some(20.0)]);
    }

    #[test]
    fn test_rolling_values() {
        let out = run(&[10.0, 12.0, 15.0, 13.0, 16.0], 3);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert!((out[2].unwrap() - 37.0 / 3.0).abs() < 1e-9);
        assert!((out[3].unwrap() - 40.0 / 3.0).abs() < 1e-9);
        assert!((out[4].unwrap() - 44.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_window_one_is_identity() {
        let out = run(&[4.0, 5.0, 6.0], 1);
        assert_eq!(out, vec![Some(4.0), Some(5.0), Some(6.0)]);
    }

    #[test]
    fn test_window_longer_than_series() {
        let out = run(&[4.0, 5.0, 6.0], 10);
        assert_eq!(out, vec![None, None, None]);
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(matches!(
            SmaModel::new(0),
            Err(AnalysisError::Parameter { param: "window", .. })
        ));
    }
}
