//! Linear model artifacts
//!
//! - `LogisticRegression`: binary classifier, class 1 when the decision
//!   function `intercept + w·x` is strictly positive
//! - `LinearRegression`: `intercept + w·x`
//!
//! Both refuse rows whose width (and, when recorded, column names) differ
//! from what they were fit on.

use serde::Deserialize;

use super::model::{Classifier, Regressor};
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{FeatureRow, SolvencyLabel};

/// Shared linear term
#[derive(Debug, Clone, Deserialize)]
pub struct LinearTerm {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearTerm {
    pub fn validate(&self, name: &str) -> AppResult<()> {
        if self.coefficients.is_empty() {
            return Err(AppError::artifact_invalid(format!("{}: no coefficients", name)));
        }
        if let Some(names) = &self.feature_names {
            if names.len() != self.coefficients.len() {
                return Err(AppError::artifact_invalid(format!(
                    "{}: {} feature names for {} coefficients",
                    name,
                    names.len(),
                    self.coefficients.len()
                )));
            }
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(AppError::artifact_invalid(format!(
                "{}: non-finite parameters",
                name
            )));
        }
        Ok(())
    }

    fn evaluate(&self, row: &FeatureRow) -> AppResult<f64> {
        row.ensure_shape(self.coefficients.len(), self.feature_names.as_deref())?;

        let value = self.intercept
            + row
                .values()
                .iter()
                .zip(&self.coefficients)
                .map(|(x, w)| x * w)
                .sum::<f64>();

        if !value.is_finite() {
            return Err(AppError::inference_failed(format!(
                "model produced non-finite value {}",
                value
            )));
        }
        Ok(value)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct LogisticRegression {
    pub term: LinearTerm,
}

impl LogisticRegression {
    pub fn decision_function(&self, row: &FeatureRow) -> AppResult<f64> {
        self.term.evaluate(row)
    }
}

impl Classifier for LogisticRegression {
    fn predict(&self, row: &FeatureRow) -> AppResult<SolvencyLabel> {
        let class = if self.decision_function(row)? > 0.0 { 1 } else { 0 };
        Ok(SolvencyLabel::from_class(class))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct LinearRegression {
    pub term: LinearTerm,
}

impl Regressor for LinearRegression {
    fn predict(&self, row: &FeatureRow) -> AppResult<f64> {
        self.term.evaluate(row)
    }
}
