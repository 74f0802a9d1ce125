//! Inference Adapter
//!
//! Turns collected form values into model-ready rows and runs the two
//! operations:
//! - solvency: encode -> scale -> classify, then credit score when solvent
//! - loan amount: single-column frame -> loan amount
//!
//! Models are injected as trait objects at construction and never mutated.

use std::sync::Arc;
use tracing::{debug, info};

use super::artifacts::ArtifactBundle;
use super::encoder::CategoryEncoder;
use super::model::{Classifier, Regressor, Scaler};
use crate::models::config::CreditScoreFeatures;
use crate::models::errors::AppResult;
use crate::models::types::{
    ApplicantRecord, EncodedFeatureRow, LoanOutcome, ScaledFeatureRow, ScoreInput, SolvencyLabel,
    SolvencyOutcome,
};

/// Handles to the loaded models
#[derive(Clone)]
pub struct ModelHandles {
    pub scaler: Arc<dyn Scaler>,
    pub solvency: Arc<dyn Classifier>,
    pub credit_score: Arc<dyn Regressor>,
    pub loan_amount: Arc<dyn Regressor>,
}

pub struct InferenceAdapter {
    encoder: CategoryEncoder,
    models: ModelHandles,
    credit_score_features: CreditScoreFeatures,
}

impl InferenceAdapter {
    pub fn new(
        encoder: CategoryEncoder,
        models: ModelHandles,
        credit_score_features: CreditScoreFeatures,
    ) -> Self {
        Self {
            encoder,
            models,
            credit_score_features,
        }
    }

    /// Build from artifacts loaded off disk
    pub fn from_bundle(bundle: ArtifactBundle, credit_score_features: CreditScoreFeatures) -> Self {
        let models = ModelHandles {
            scaler: Arc::new(bundle.scaler),
            solvency: Arc::new(bundle.solvency),
            credit_score: Arc::new(bundle.credit_score),
            loan_amount: Arc::new(bundle.loan_amount),
        };
        Self::new(bundle.encoder, models, credit_score_features)
    }

    pub fn credit_score_features(&self) -> CreditScoreFeatures {
        self.credit_score_features
    }

    /// Encoded and scaled rows for one applicant
    pub fn prepare(&self, record: &ApplicantRecord) -> AppResult<(EncodedFeatureRow, ScaledFeatureRow)> {
        let encoded = self.encoder.encode(record)?;
        let scaled = ScaledFeatureRow(self.models.scaler.transform(&encoded.0)?);
        Ok((encoded, scaled))
    }

    /// Solvency, plus credit score for solvent applicants only
    pub fn predict_solvency(&self, record: &ApplicantRecord) -> AppResult<SolvencyOutcome> {
        let (encoded, scaled) = self.prepare(record)?;

        let label = self.models.solvency.predict(&scaled.0)?;
        debug!(%label, "Solvency classified");

        let outcome = match label {
            SolvencyLabel::NotSolvent => SolvencyOutcome::NotSolvent,
            SolvencyLabel::Solvent => {
                let row = match self.credit_score_features {
                    CreditScoreFeatures::Unscaled => &encoded.0,
                    CreditScoreFeatures::Scaled => &scaled.0,
                };
                let credit_score = self.models.credit_score.predict(row)?;
                SolvencyOutcome::Solvent { credit_score }
            }
        };

        info!(
            label = %outcome.label(),
            credit_score = ?outcome.credit_score(),
            "🧮 Solvency prediction"
        );
        Ok(outcome)
    }

    /// Loan amount from a user-entered credit score
    pub fn predict_loan_amount(&self, input: &ScoreInput) -> AppResult<LoanOutcome> {
        let amount = self.models.loan_amount.predict(&input.to_row())?;
        info!(credit_score = input.credit_score, amount, "💰 Loan amount prediction");
        Ok(LoanOutcome { amount })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::errors::{AppError, ErrorCode};
    use crate::models::types::{Education, FeatureRow, Job, Marital, YesNo};
    use std::sync::Mutex;

    /// Scaler that subtracts 1 from every value so scaled and unscaled rows differ
    pub(crate) struct ShiftScaler;

    impl Scaler for ShiftScaler {
        fn transform(&self, row: &FeatureRow) -> AppResult<FeatureRow> {
            let values = row.values().iter().map(|v| v - 1.0).collect();
            FeatureRow::new(row.columns().to_vec(), values)
        }
    }

    pub(crate) struct FixedClassifier(pub SolvencyLabel);

    impl Classifier for FixedClassifier {
        fn predict(&self, _row: &FeatureRow) -> AppResult<SolvencyLabel> {
            Ok(self.0)
        }
    }

    /// Returns a fixed value and remembers every row it saw
    pub(crate) struct RecordingRegressor {
        pub value: f64,
        pub seen: Mutex<Vec<FeatureRow>>,
    }

    impl RecordingRegressor {
        pub(crate) fn new(value: f64) -> Self {
            Self {
                value,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    impl Regressor for RecordingRegressor {
        fn predict(&self, row: &FeatureRow) -> AppResult<f64> {
            self.seen.lock().unwrap().push(row.clone());
            Ok(self.value)
        }
    }

    /// Classifier fit on `.0` columns; any other row width is a shape mismatch
    pub(crate) struct WidthClassifier(pub usize);

    impl Classifier for WidthClassifier {
        fn predict(&self, row: &FeatureRow) -> AppResult<SolvencyLabel> {
            row.ensure_shape(self.0, None)?;
            Ok(SolvencyLabel::Solvent)
        }
    }

    pub(crate) fn scenario_record() -> ApplicantRecord {
        ApplicantRecord::new(
            30,
            Job::Admin,
            Marital::Married,
            Education::Secondary,
            0,
            YesNo::Yes,
            YesNo::No,
        )
        .unwrap()
    }

    pub(crate) fn stub_adapter(
        label: SolvencyLabel,
        credit_score: Arc<RecordingRegressor>,
        loan_amount: f64,
        mode: CreditScoreFeatures,
    ) -> InferenceAdapter {
        InferenceAdapter::new(
            CategoryEncoder::from_form_options(),
            ModelHandles {
                scaler: Arc::new(ShiftScaler),
                solvency: Arc::new(FixedClassifier(label)),
                credit_score,
                loan_amount: Arc::new(RecordingRegressor::new(loan_amount)),
            },
            mode,
        )
    }

    #[test]
    fn test_not_solvent_skips_credit_score() {
        let credit = Arc::new(RecordingRegressor::new(700.0));
        let adapter = stub_adapter(
            SolvencyLabel::NotSolvent,
            credit.clone(),
            0.0,
            CreditScoreFeatures::Unscaled,
        );

        let outcome = adapter.predict_solvency(&scenario_record()).unwrap();
        assert_eq!(outcome, SolvencyOutcome::NotSolvent);
        assert_eq!(credit.calls(), 0);
    }

    #[test]
    fn test_solvent_scores_unscaled_row() {
        let credit = Arc::new(RecordingRegressor::new(712.345));
        let adapter = stub_adapter(
            SolvencyLabel::Solvent,
            credit.clone(),
            0.0,
            CreditScoreFeatures::Unscaled,
        );

        let outcome = adapter.predict_solvency(&scenario_record()).unwrap();
        assert_eq!(outcome, SolvencyOutcome::Solvent { credit_score: 712.345 });

        let seen = credit.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].values(), &[30.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_scaled_mode_scores_scaled_row() {
        let credit = Arc::new(RecordingRegressor::new(1.0));
        let adapter = stub_adapter(
            SolvencyLabel::Solvent,
            credit.clone(),
            0.0,
            CreditScoreFeatures::Scaled,
        );

        adapter.predict_solvency(&scenario_record()).unwrap();
        let seen = credit.seen.lock().unwrap();
        assert_eq!(seen[0].values(), &[29.0, -1.0, 0.0, 0.0, -1.0, 0.0, -1.0]);
    }

    #[test]
    fn test_repeated_prediction_is_identical() {
        let credit = Arc::new(RecordingRegressor::new(640.0));
        let adapter = stub_adapter(
            SolvencyLabel::Solvent,
            credit.clone(),
            0.0,
            CreditScoreFeatures::Unscaled,
        );

        let first = adapter.predict_solvency(&scenario_record()).unwrap();
        let second = adapter.predict_solvency(&scenario_record()).unwrap();
        assert_eq!(first, second);

        let seen = credit.seen.lock().unwrap();
        assert_eq!(seen[0], seen[1]);
    }

    #[test]
    fn test_loan_amount_uses_credit_score_column() {
        let adapter = stub_adapter(
            SolvencyLabel::Solvent,
            Arc::new(RecordingRegressor::new(0.0)),
            15000.5,
            CreditScoreFeatures::Unscaled,
        );

        let outcome = adapter
            .predict_loan_amount(&ScoreInput::new(650.0).unwrap())
            .unwrap();
        assert_eq!(outcome.amount, 15000.5);
    }

    #[test]
    fn test_shape_mismatch_propagates() {
        let adapter = InferenceAdapter::new(
            CategoryEncoder::from_form_options(),
            ModelHandles {
                scaler: Arc::new(ShiftScaler),
                solvency: Arc::new(WidthClassifier(6)),
                credit_score: Arc::new(RecordingRegressor::new(0.0)),
                loan_amount: Arc::new(RecordingRegressor::new(0.0)),
            },
            CreditScoreFeatures::Unscaled,
        );

        let err: AppError = adapter.predict_solvency(&scenario_record()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InferenceShapeMismatch);
    }
}
