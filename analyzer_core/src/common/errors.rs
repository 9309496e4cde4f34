use thiserror::Error;

/// Errors surfaced by the analysis engine.
///
/// Parameter problems are raised before any computation starts;
/// data-integrity problems carry the index of the offending record so the
/// caller can point at the bad row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("invalid parameter `{param}`: {msg}")]
    Parameter { param: &'static str, msg: String },

    #[error("data integrity error at index {index}: {msg}")]
    DataIntegrity { index: usize, msg: String },

    #[error("empty input: {0}")]
    EmptyInput(String),

    #[error("source data format error: {0}")]
    SourceFormat(String),
}

impl AnalysisError {
    pub fn parameter(param: &'static str, msg: impl Into<String>) -> Self {
        Self::Parameter {
            param,
            msg: msg.into(),
        }
    }

    pub fn data_integrity(index: usize, msg: impl Into<String>) -> Self {
        Self::DataIntegrity {
            index,
            msg: msg.into(),
        }
    }
}
