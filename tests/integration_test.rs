//! Integration tests against the bundled model artifacts

use loan_predictor::form::{render, FormEvent, FormState, PanelStatus};
use loan_predictor::models::{
    ApplicantRecord, CreditScoreFeatures, Education, ErrorCode, Job, Marital, ScoreInput,
    SolvencyLabel, SolvencyOutcome, YesNo,
};
use loan_predictor::{ArtifactBundle, InferenceAdapter};
use std::path::PathBuf;

fn adapter(mode: CreditScoreFeatures) -> InferenceAdapter {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("artifacts");
    let bundle = ArtifactBundle::load_dir(dir).expect("bundled artifacts load");
    InferenceAdapter::from_bundle(bundle, mode)
}

fn strong_applicant() -> ApplicantRecord {
    ApplicantRecord::new(
        45,
        Job::Management,
        Marital::Married,
        Education::Tertiary,
        50_000,
        YesNo::No,
        YesNo::No,
    )
    .unwrap()
}

fn weak_applicant() -> ApplicantRecord {
    ApplicantRecord::new(
        25,
        Job::Unemployed,
        Marital::Single,
        Education::Primary,
        -5_000,
        YesNo::Yes,
        YesNo::Yes,
    )
    .unwrap()
}

#[test]
fn test_encoding_uses_persisted_codes() {
    let adapter = adapter(CreditScoreFeatures::Unscaled);
    let (encoded, scaled) = adapter.prepare(&strong_applicant()).unwrap();

    assert_eq!(encoded.0.values(), &[45.0, 4.0, 1.0, 2.0, 50_000.0, 0.0, 0.0]);
    assert_eq!(
        encoded.0.columns(),
        &["age", "job", "marital", "education", "balance", "housing", "loan"]
    );
    // (45 - 41) / 10.6
    assert!((scaled.0.values()[0] - 4.0 / 10.6).abs() < 1e-9);
}

#[test]
fn test_solvent_applicant_gets_credit_score() {
    let adapter = adapter(CreditScoreFeatures::Unscaled);
    let outcome = adapter.predict_solvency(&strong_applicant()).unwrap();

    assert_eq!(outcome.label(), SolvencyLabel::Solvent);
    let score = outcome.credit_score().unwrap();
    assert!((score - 840.0).abs() < 1e-6, "score was {}", score);
}

#[test]
fn test_not_solvent_applicant_has_no_score() {
    let adapter = adapter(CreditScoreFeatures::Unscaled);
    let outcome = adapter.predict_solvency(&weak_applicant()).unwrap();
    assert_eq!(outcome, SolvencyOutcome::NotSolvent);
    assert!(outcome.credit_score().is_none());
}

#[test]
fn test_scaled_mode_changes_credit_score_input() {
    let unscaled = adapter(CreditScoreFeatures::Unscaled)
        .predict_solvency(&strong_applicant())
        .unwrap();
    let scaled = adapter(CreditScoreFeatures::Scaled)
        .predict_solvency(&strong_applicant())
        .unwrap();

    assert_eq!(scaled.label(), SolvencyLabel::Solvent);
    assert_ne!(unscaled.credit_score(), scaled.credit_score());
}

#[test]
fn test_predictions_are_idempotent() {
    let adapter = adapter(CreditScoreFeatures::Unscaled);
    let first = adapter.predict_solvency(&strong_applicant()).unwrap();
    let second = adapter.predict_solvency(&strong_applicant()).unwrap();
    assert_eq!(first, second);

    let input = ScoreInput::new(650.0).unwrap();
    assert_eq!(
        adapter.predict_loan_amount(&input).unwrap(),
        adapter.predict_loan_amount(&input).unwrap()
    );
}

#[test]
fn test_loan_amount_across_score_range() {
    let adapter = adapter(CreditScoreFeatures::Unscaled);

    let amount = |score: f64| {
        adapter
            .predict_loan_amount(&ScoreInput::new(score).unwrap())
            .unwrap()
            .amount
    };

    assert!((amount(650.0) - 14_250.0).abs() < 1e-9);
    assert!((amount(0.0) + 2_000.0).abs() < 1e-9);
    assert!((amount(1000.0) - 23_000.0).abs() < 1e-9);
}

#[test]
fn test_boundary_inputs() {
    assert!(ApplicantRecord::new(18, Job::Student, Marital::Single, Education::Unknown, -100_000, YesNo::No, YesNo::No).is_ok());
    assert!(ApplicantRecord::new(120, Job::Retired, Marital::Divorced, Education::Unknown, 1_000_000, YesNo::Yes, YesNo::No).is_ok());

    let err = ApplicantRecord::new(17, Job::Student, Marital::Single, Education::Primary, 0, YesNo::No, YesNo::No)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InputOutOfRange);
    let err = ScoreInput::new(1000.5).unwrap_err();
    assert_eq!(err.code, ErrorCode::InputOutOfRange);
}

#[test]
fn test_form_session() {
    let adapter = adapter(CreditScoreFeatures::Unscaled);
    let state = FormState::default();

    let (state, view) = render(&adapter, state, FormEvent::EditApplicant(strong_applicant()));
    assert!(view.solvency.is_empty());

    let (state, view) = render(&adapter, state, FormEvent::PredictSolvency);
    assert!(matches!(state.solvency, PanelStatus::Rendered(SolvencyOutcome::Solvent { .. })));
    assert_eq!(view.solvency.len(), 2);
    assert_eq!(view.solvency[1].text(), "📊 Credit score: 840.00");

    let (state, _) = render(&adapter, state, FormEvent::EditScore(ScoreInput::new(650.0).unwrap()));
    let (state, view) = render(&adapter, state, FormEvent::PredictLoan);
    assert_eq!(state.solvency, PanelStatus::Idle);
    assert!(view.solvency.is_empty());
    assert_eq!(view.loan[0].text(), "💰 Predicted loan amount: 14,250.00$");
}
