use crate::series::price_series::PriceSeries;

/// Maximum profit under unlimited transactions: the sum of every positive
/// day-over-day delta (buy each local minimum, sell each local maximum).
/// Empty and single-element series yield zero.
#[derive(Debug, Default)]
pub struct MaxProfitModel {
    last_price: Option<f64>,
    profit: f64,
}

impl MaxProfitModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, price: f64) {
        if let Some(last_price) = self.last_price.replace(price) {
            if price > last_price {
                self.profit += price - last_price;
            }
        }
    }

    pub fn total(&self) -> f64 {
        self.profit
    }
}

/// Convenience pass over a whole series.
pub fn max_profit(series: &PriceSeries) -> f64 {
    let mut model = MaxProfitModel::new();
    for p in series.iter() {
        model.add(p.close);
    }
    model.total()
}
