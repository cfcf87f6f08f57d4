//! MyFit AI
//!
//! Body-metric health check: BMI with a rule-based category, a category
//! from a small decision tree fit at startup, and rule-derived advice.
//!
//! - `bmi`: BMI calculation and threshold classification
//! - `predictor`: decision tree classifier and its fixed training set
//! - `recommendations`: advice list builder
//! - `assessment`: form parsing, validation and the result bundle
//! - `api_server` / `web`: Axum router, JSON endpoints and the form page
//!   (feature `api`)

pub mod errors;
pub mod bmi;
pub mod predictor;
pub mod recommendations;
pub mod assessment;
pub mod config;

#[cfg(feature = "api")]
pub mod api_server;
#[cfg(feature = "api")]
pub mod web;

// Re-export commonly used types
pub use errors::{AssessmentError, PredictorError};
pub use bmi::{calculate_bmi, classify_bmi, BmiCategory};
pub use predictor::{CategoryPredictor, PredictedCategory};
pub use recommendations::build_recommendations;
pub use assessment::{assess, Assessment, Gender, Measurement, MeasurementForm};
pub use config::ServerConfig;

#[cfg(feature = "api")]
pub use api_server::{AppState, create_router};
