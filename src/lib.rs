//! Loan Predictor Library
//!
//! Two-panel prediction form over pre-trained models:
//! - Panel 1: solvency classification, then credit score when solvent
//! - Panel 2: loan amount from a user-entered credit score
//!
//! Modules:
//! - `core`: encoder, scaler, linear models and the inference adapter
//! - `form`: pure reducer plus HTML rendering
//! - `api`: axum host for the form and a JSON API
//! - `models`: shared types, errors and configuration
//! - `utils`: prediction telemetry

pub mod api;
pub mod core;
pub mod form;
pub mod models;
pub mod utils;

pub use crate::core::{ArtifactBundle, InferenceAdapter};
pub use form::{render, FormEvent, FormState, View};
pub use models::{AppConfig, AppError, AppResult, ErrorCode};
pub use utils::telemetry::{PredictionTelemetry, TelemetryStats};
