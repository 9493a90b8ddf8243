// Closed set of failures reported by the readings pipeline
use crate::domain::date_parser::InvalidDateFormat;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("invalid date format: {0}")]
    InvalidDateFormat(String),

    #[error("no data available for the given filters")]
    NoDataAvailable,

    /// Detail is logged where the failure is converted, never returned.
    #[error("internal processing failure")]
    InternalProcessingFailure,
}

impl PipelineError {
    pub fn is_client_error(&self) -> bool {
        !matches!(self, PipelineError::InternalProcessingFailure)
    }
}

impl From<InvalidDateFormat> for PipelineError {
    fn from(err: InvalidDateFormat) -> Self {
        PipelineError::InvalidDateFormat(err.input)
    }
}
