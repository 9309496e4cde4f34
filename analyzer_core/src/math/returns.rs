use crate::common::errors::AnalysisError;

/// Day-over-day fractional return: `(p[i] - p[i-1]) / p[i-1]`.
///
/// The first observation has no predecessor and yields `None`. A zero
/// previous close cannot divide and is reported as a data-integrity error
/// carrying the predecessor's index; a validated `PriceSeries` never
/// contains one, so this only fires on raw inputs.
#[derive(Debug, Default)]
pub struct ReturnsModel {
    last_price: Option<f64>,
    index: usize,
}

impl ReturnsModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, price: f64) -> Result<Option<f64>, AnalysisError> {
        let index = self.index;
        self.index += 1;

        let last_price = match self.last_price.replace(price) {
            Some(p) => p,
            None => return Ok(None),
        };
        if last_price == 0.0 {
            return Err(AnalysisError::data_integrity(
                index - 1,
                "zero close price cannot be a return denominator",
            ));
        }
        Ok(Some((price - last_price) / last_price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(prices: &[f64]) -> Vec<Option<f64>> {
        let mut model = ReturnsModel::new();
        prices.iter().map(|&p| model.add(p).unwrap()).collect()
    }

    #[test]
    fn test_first_value_undefined() {
        let out = run(&[10.0, 12.0]);
        assert_eq!(out[0], None);
    }

    #[test]
    fn test_fractional_returns() {
        let out = run(&[10.0, 12.0, 15.0, 13.0]);
        assert!((out[1].unwrap() - 0.2).abs() < 1e-9);
        assert!((out[2].unwrap() - 0.25).abs() < 1e-9);
        assert!((out[3].unwrap() - (-2.0 / 15.0)).abs() < 1e-9);
    }

    #[test]
    fn test_zero_denominator_surfaced() {
        let mut model = ReturnsModel::new();
        assert_eq!(model.add(0.0).unwrap(), None);
        let err = model.add(5.0).unwrap_err();
        assert!(matches!(err, AnalysisError::DataIntegrity { index: 0, .. }));
    }
}
