use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use analyzer_core::common::trade_date::TradeDate;
use analyzer_core::{AnalysisError, PricePoint, PriceSeries};

/// One CSV row. Only the date and close columns matter; any other OHLCV
/// columns in the file are ignored.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "Date", alias = "DATE")]
    date: String,
    #[serde(alias = "Close", alias = "CLOSE")]
    close: f64,
}

/// Loads a ticker's daily records from a headered CSV file.
pub fn load_series(path: &Path) -> Result<PriceSeries, AnalysisError> {
    let reader = csv::Reader::from_path(path).map_err(|e| {
        AnalysisError::SourceFormat(format!("cannot open {}: {}", path.display(), e))
    })?;
    read_series(reader).map_err(|e| match e {
        AnalysisError::SourceFormat(msg) => {
            AnalysisError::SourceFormat(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

fn read_series<R: Read>(mut reader: csv::Reader<R>) -> Result<PriceSeries, AnalysisError> {
    let mut points = Vec::new();
    for (i, result) in reader.deserialize::<CsvRow>().enumerate() {
        // header is line 1, first record line 2
        let row = result
            .map_err(|e| AnalysisError::SourceFormat(format!("line {}: {}", i + 2, e)))?;
        points.push(PricePoint::new(TradeDate::parse(&row.date)?, row.close));
    }
    PriceSeries::new(points)
}

/// Ticker label for a data file: the upper-cased file stem.
pub fn ticker_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_uppercase())
        .unwrap_or_else(|| path.display().to_string())
}
