//! Core Module - feature encoding and model inference
//!
//! Artifacts are loaded once at startup; everything here is read-only
//! afterwards and safe to share across requests.

pub mod adapter;
pub mod artifacts;
pub mod encoder;
pub mod linear;
pub mod model;
pub mod scaler;

pub use adapter::{InferenceAdapter, ModelHandles};
pub use artifacts::ArtifactBundle;
pub use encoder::CategoryEncoder;
pub use linear::{LinearRegression, LinearTerm, LogisticRegression};
pub use model::{Classifier, Regressor, Scaler};
pub use scaler::StandardScaler;
