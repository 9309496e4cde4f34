pub mod analyzer;
pub mod common;
pub mod compare;
pub mod config;
pub mod math;
pub mod portfolio;
pub mod series;

pub use analyzer::analyzer::Analyzer;
pub use analyzer::report::AnalysisReport;
pub use common::errors::AnalysisError;
pub use config::analysis_config::AnalysisConfig;
pub use series::price_series::{PricePoint, PriceSeries};
