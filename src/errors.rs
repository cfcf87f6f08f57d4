//! Error types for body-metric assessment.
//!
//! `AssessmentError` messages are shown to the user verbatim, so their
//! `Display` output is part of the page contract.

use thiserror::Error;

/// A submission that cannot be assessed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssessmentError {
    /// A field could not be parsed as the expected type
    #[error("Invalid input. Please check your values.")]
    InvalidInput { field: &'static str },

    /// Fields parsed but fall outside the accepted range
    #[error("Please enter valid positive values.")]
    OutOfRange,
}

/// Failure to fit the category predictor.
#[derive(Error, Debug)]
pub enum PredictorError {
    #[error("Failed to fit category predictor: {0}")]
    Fit(#[from] aprender::error::AprenderError),
}
