//! Model artifact loader
//!
//! Reads the persisted encoder table, scaler and the three models from one
//! directory at startup. Everything loaded here is read-only afterwards.

use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

use super::encoder::CategoryEncoder;
use super::linear::{LinearRegression, LogisticRegression};
use super::scaler::StandardScaler;
use crate::models::errors::{AppError, AppResult, ErrorCode};

pub const SOLVENCY_MODEL_FILE: &str = "solvency_model.json";
pub const CREDIT_SCORE_MODEL_FILE: &str = "credit_score_model.json";
pub const LOAN_MODEL_FILE: &str = "loan_model.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const ENCODERS_FILE: &str = "encoders.json";

/// All artifacts the inference adapter needs
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    pub encoder: CategoryEncoder,
    pub scaler: StandardScaler,
    pub solvency: LogisticRegression,
    pub credit_score: LinearRegression,
    pub loan_amount: LinearRegression,
}

impl ArtifactBundle {
    /// Load every artifact from `dir`
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> AppResult<Self> {
        let dir = dir.as_ref();
        info!(dir = %dir.display(), "📦 Loading model artifacts");

        let classes: BTreeMap<String, Vec<String>> = read_json(dir, ENCODERS_FILE)?;
        let encoder = CategoryEncoder::from_classes(classes)?;

        let scaler: StandardScaler = read_json(dir, SCALER_FILE)?;
        scaler.validate()?;

        let solvency: LogisticRegression = read_json(dir, SOLVENCY_MODEL_FILE)?;
        solvency.term.validate(SOLVENCY_MODEL_FILE)?;

        let credit_score: LinearRegression = read_json(dir, CREDIT_SCORE_MODEL_FILE)?;
        credit_score.term.validate(CREDIT_SCORE_MODEL_FILE)?;

        let loan_amount: LinearRegression = read_json(dir, LOAN_MODEL_FILE)?;
        loan_amount.term.validate(LOAN_MODEL_FILE)?;

        info!(
            scaler_columns = scaler.mean.len(),
            solvency_features = solvency.term.coefficients.len(),
            credit_score_features = credit_score.term.coefficients.len(),
            loan_features = loan_amount.term.coefficients.len(),
            "✅ Model artifacts loaded"
        );

        Ok(Self {
            encoder,
            scaler,
            solvency,
            credit_score,
            loan_amount,
        })
    }
}

fn read_json<T: DeserializeOwned>(dir: &Path, file: &str) -> AppResult<T> {
    let path: PathBuf = dir.join(file);

    let raw = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            AppError::artifact_missing(format!("{} not found", path.display()))
        }
        _ => AppError::with_source(
            ErrorCode::ArtifactMissing,
            format!("cannot read {}", path.display()),
            e,
        ),
    })?;

    let parsed = serde_json::from_str(&raw).map_err(|e| {
        AppError::with_source(
            ErrorCode::ArtifactInvalid,
            format!("{} is not a valid artifact", path.display()),
            e,
        )
    })?;

    info!(artifact = %file, path = %path.display(), "Artifact loaded");
    Ok(parsed)
}
