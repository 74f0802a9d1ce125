//! Standard scaler: `(x - mean) / scale` per column, with the statistics and
//! column order captured at fit time.

use serde::Deserialize;

use super::model::Scaler;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::FeatureRow;

#[derive(Debug, Clone, Deserialize)]
pub struct StandardScaler {
    /// Column names seen at fit time, when the artifact recorded them
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Check internal consistency after deserialisation
    pub fn validate(&self) -> AppResult<()> {
        if self.mean.is_empty() || self.mean.len() != self.scale.len() {
            return Err(AppError::artifact_invalid(format!(
                "scaler has {} means and {} scales",
                self.mean.len(),
                self.scale.len()
            )));
        }
        if let Some(names) = &self.feature_names {
            if names.len() != self.mean.len() {
                return Err(AppError::artifact_invalid(format!(
                    "scaler lists {} feature names for {} columns",
                    names.len(),
                    self.mean.len()
                )));
            }
        }
        if self.mean.iter().any(|m| !m.is_finite()) {
            return Err(AppError::artifact_invalid("scaler mean is not finite"));
        }
        if self.scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
            return Err(AppError::artifact_invalid(
                "scaler scale entries must be finite and non-zero",
            ));
        }
        Ok(())
    }
}

impl Scaler for StandardScaler {
    fn transform(&self, row: &FeatureRow) -> AppResult<FeatureRow> {
        row.ensure_shape(self.mean.len(), self.feature_names.as_deref())?;

        let values = row
            .values()
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect();

        FeatureRow::new(row.columns().to_vec(), values)
    }
}
