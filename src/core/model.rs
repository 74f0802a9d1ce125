//! Model capability traits
//!
//! The inference path only depends on these; artifacts loaded from disk and
//! test doubles both implement them.

use crate::models::errors::AppResult;
use crate::models::types::{FeatureRow, SolvencyLabel};

/// Binary classifier over one feature row
pub trait Classifier: Send + Sync {
    fn predict(&self, row: &FeatureRow) -> AppResult<SolvencyLabel>;
}

/// Continuous regressor over one feature row
pub trait Regressor: Send + Sync {
    fn predict(&self, row: &FeatureRow) -> AppResult<f64>;
}

/// Fitted row transform applied before classification
pub trait Scaler: Send + Sync {
    fn transform(&self, row: &FeatureRow) -> AppResult<FeatureRow>;
}
