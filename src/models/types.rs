//! Type definitions for the loan predictor
//! Applicant record, categorical domains and the numeric rows fed to models

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::{AppError, AppResult};

// ============================================
// Field bounds (declared on the form widgets and re-checked here)
// ============================================

pub const AGE_MIN: i64 = 18;
pub const AGE_MAX: i64 = 120;
pub const BALANCE_MIN: i64 = -100_000;
pub const BALANCE_MAX: i64 = 1_000_000;
pub const CREDIT_SCORE_MIN: f64 = 0.0;
pub const CREDIT_SCORE_MAX: f64 = 1000.0;

/// Column order of an encoded applicant row, as captured at training time
pub const APPLICANT_COLUMNS: [&str; 7] = [
    "age",
    "job",
    "marital",
    "education",
    "balance",
    "housing",
    "loan",
];

/// Single column consumed by the loan-amount model
pub const CREDIT_SCORE_COLUMN: &str = "credit_score";

// ============================================
// Categorical domains
// ============================================

/// A closed set of select-box options backed by a label-encoded column
pub trait Category: Copy + Sized + 'static {
    /// Column name in the encoder table
    const COLUMN: &'static str;

    /// Options in form display order
    fn options() -> &'static [Self];

    fn as_str(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Job {
    #[serde(rename = "admin.")]
    Admin,
    #[serde(rename = "technician")]
    Technician,
    #[serde(rename = "services")]
    Services,
    #[serde(rename = "management")]
    Management,
    #[serde(rename = "retired")]
    Retired,
    #[serde(rename = "blue-collar")]
    BlueCollar,
    #[serde(rename = "unemployed")]
    Unemployed,
    #[serde(rename = "entrepreneur")]
    Entrepreneur,
    #[serde(rename = "housemaid")]
    Housemaid,
    #[serde(rename = "self-employed")]
    SelfEmployed,
    #[serde(rename = "student")]
    Student,
}

impl Category for Job {
    const COLUMN: &'static str = "job";

    fn options() -> &'static [Self] {
        &[
            Job::Admin,
            Job::Technician,
            Job::Services,
            Job::Management,
            Job::Retired,
            Job::BlueCollar,
            Job::Unemployed,
            Job::Entrepreneur,
            Job::Housemaid,
            Job::SelfEmployed,
            Job::Student,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Job::Admin => "admin.",
            Job::Technician => "technician",
            Job::Services => "services",
            Job::Management => "management",
            Job::Retired => "retired",
            Job::BlueCollar => "blue-collar",
            Job::Unemployed => "unemployed",
            Job::Entrepreneur => "entrepreneur",
            Job::Housemaid => "housemaid",
            Job::SelfEmployed => "self-employed",
            Job::Student => "student",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marital {
    Married,
    Single,
    Divorced,
}

impl Category for Marital {
    const COLUMN: &'static str = "marital";

    fn options() -> &'static [Self] {
        &[Marital::Married, Marital::Single, Marital::Divorced]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Marital::Married => "married",
            Marital::Single => "single",
            Marital::Divorced => "divorced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Education {
    Primary,
    Secondary,
    Tertiary,
    Unknown,
}

impl Category for Education {
    const COLUMN: &'static str = "education";

    fn options() -> &'static [Self] {
        &[
            Education::Primary,
            Education::Secondary,
            Education::Tertiary,
            Education::Unknown,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Education::Primary => "primary",
            Education::Secondary => "secondary",
            Education::Tertiary => "tertiary",
            Education::Unknown => "unknown",
        }
    }
}

/// Yes/no flag; `housing` and `loan` each have their own encoder column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn options() -> &'static [Self] {
        &[YesNo::Yes, YesNo::No]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            YesNo::Yes => "yes",
            YesNo::No => "no",
        }
    }
}

// ============================================
// Applicant Record (panel 1)
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub age: i64,
    pub job: Job,
    pub marital: Marital,
    pub education: Education,
    pub balance: i64,
    pub housing: YesNo,
    pub loan: YesNo,
}

impl ApplicantRecord {
    /// Build a record, enforcing the same bounds the form widgets declare
    pub fn new(
        age: i64,
        job: Job,
        marital: Marital,
        education: Education,
        balance: i64,
        housing: YesNo,
        loan: YesNo,
    ) -> AppResult<Self> {
        let record = Self {
            age,
            job,
            marital,
            education,
            balance,
            housing,
            loan,
        };
        record.validate()?;
        Ok(record)
    }

    pub fn validate(&self) -> AppResult<()> {
        if !(AGE_MIN..=AGE_MAX).contains(&self.age) {
            return Err(AppError::out_of_range(format!(
                "age must be within [{}, {}], got {}",
                AGE_MIN, AGE_MAX, self.age
            )));
        }
        if !(BALANCE_MIN..=BALANCE_MAX).contains(&self.balance) {
            return Err(AppError::out_of_range(format!(
                "balance must be within [{}, {}], got {}",
                BALANCE_MIN, BALANCE_MAX, self.balance
            )));
        }
        Ok(())
    }
}

impl Default for ApplicantRecord {
    /// Initial form values: age 30, balance 0, first option of every select
    fn default() -> Self {
        Self {
            age: 30,
            job: Job::Admin,
            marital: Marital::Married,
            education: Education::Primary,
            balance: 0,
            housing: YesNo::Yes,
            loan: YesNo::Yes,
        }
    }
}

// ============================================
// Score Input (panel 2)
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ScoreInput {
    pub credit_score: f64,
}

impl ScoreInput {
    pub fn new(credit_score: f64) -> AppResult<Self> {
        let input = Self { credit_score };
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> AppResult<()> {
        // NaN fails the range check as well
        if !(CREDIT_SCORE_MIN..=CREDIT_SCORE_MAX).contains(&self.credit_score) {
            return Err(AppError::out_of_range(format!(
                "credit_score must be within [{}, {}], got {}",
                CREDIT_SCORE_MIN, CREDIT_SCORE_MAX, self.credit_score
            )));
        }
        Ok(())
    }

    /// Single-row frame with the `credit_score` column
    pub fn to_row(&self) -> FeatureRow {
        FeatureRow {
            columns: vec![CREDIT_SCORE_COLUMN.to_string()],
            values: vec![self.credit_score],
        }
    }
}

// ============================================
// Feature rows
// ============================================

/// One named numeric row, the unit every model and the scaler consume
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl FeatureRow {
    /// Columns and values are paired positionally and must have equal length
    pub fn new(columns: Vec<String>, values: Vec<f64>) -> AppResult<Self> {
        if columns.len() != values.len() {
            return Err(AppError::shape_mismatch(format!(
                "{} columns for {} values",
                columns.len(),
                values.len()
            )));
        }
        Ok(Self { columns, values })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check this row against the width and (optionally) column names a model was fit on
    pub fn ensure_shape(&self, expected_width: usize, expected_columns: Option<&[String]>) -> AppResult<()> {
        if self.len() != expected_width {
            return Err(AppError::shape_mismatch(format!(
                "expected {} features, got {} ({})",
                expected_width,
                self.len(),
                self.columns.join(", ")
            )));
        }
        if let Some(expected) = expected_columns {
            if expected != self.columns.as_slice() {
                return Err(AppError::shape_mismatch(format!(
                    "feature names differ: expected [{}], got [{}]",
                    expected.join(", "),
                    self.columns.join(", ")
                )));
            }
        }
        Ok(())
    }
}

/// Applicant row with categoricals replaced by their training-time codes
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedFeatureRow(pub FeatureRow);

/// Encoded row after the persisted scaling transform
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledFeatureRow(pub FeatureRow);

// ============================================
// Model outcomes
// ============================================

/// Binary output of the solvency classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolvencyLabel {
    Solvent,
    NotSolvent,
}

impl SolvencyLabel {
    /// Class `1` is solvent, anything else is not
    pub fn from_class(class: i64) -> Self {
        if class == 1 {
            Self::Solvent
        } else {
            Self::NotSolvent
        }
    }
}

impl fmt::Display for SolvencyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solvent => write!(f, "solvent"),
            Self::NotSolvent => write!(f, "not solvent"),
        }
    }
}

/// Solvency prediction result: either solvent with a score, or rejected
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolvencyOutcome {
    Solvent { credit_score: f64 },
    NotSolvent,
}

impl SolvencyOutcome {
    pub fn label(&self) -> SolvencyLabel {
        match self {
            Self::Solvent { .. } => SolvencyLabel::Solvent,
            Self::NotSolvent => SolvencyLabel::NotSolvent,
        }
    }

    pub fn credit_score(&self) -> Option<f64> {
        match self {
            Self::Solvent { credit_score } => Some(*credit_score),
            Self::NotSolvent => None,
        }
    }
}

/// Loan amount prediction result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanOutcome {
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::ErrorCode;

    fn record(age: i64, balance: i64) -> AppResult<ApplicantRecord> {
        ApplicantRecord::new(
            age,
            Job::Admin,
            Marital::Married,
            Education::Secondary,
            balance,
            YesNo::Yes,
            YesNo::No,
        )
    }

    #[test]
    fn test_boundaries_accepted() {
        assert!(record(18, 0).is_ok());
        assert!(record(120, 0).is_ok());
        assert!(record(30, -100_000).is_ok());
        assert!(record(30, 1_000_000).is_ok());
        assert!(ScoreInput::new(0.0).is_ok());
        assert!(ScoreInput::new(1000.0).is_ok());
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(record(17, 0).unwrap_err().code, ErrorCode::InputOutOfRange);
        assert_eq!(record(121, 0).unwrap_err().code, ErrorCode::InputOutOfRange);
        assert_eq!(record(30, -100_001).unwrap_err().code, ErrorCode::InputOutOfRange);
        assert_eq!(record(30, 1_000_001).unwrap_err().code, ErrorCode::InputOutOfRange);
        assert!(ScoreInput::new(-0.01).is_err());
        assert!(ScoreInput::new(1000.01).is_err());
        assert!(ScoreInput::new(f64::NAN).is_err());
    }

    #[test]
    fn test_category_strings_match_serde() {
        for job in Job::options() {
            let json = serde_json::to_string(job).unwrap();
            assert_eq!(json, format!("\"{}\"", job.as_str()));
        }
        let parsed: Job = serde_json::from_str("\"self-employed\"").unwrap();
        assert_eq!(parsed, Job::SelfEmployed);
        assert!(serde_json::from_str::<Marital>("\"widowed\"").is_err());
    }

    #[test]
    fn test_domain_sizes() {
        assert_eq!(Job::options().len(), 11);
        assert_eq!(Marital::options().len(), 3);
        assert_eq!(Education::options().len(), 4);
        assert_eq!(YesNo::options().len(), 2);
    }

    #[test]
    fn test_ensure_shape() {
        let row = ScoreInput::new(650.0).unwrap().to_row();
        assert!(row.ensure_shape(1, None).is_ok());
        assert!(row.ensure_shape(1, Some(&["credit_score".to_string()])).is_ok());

        let err = row.ensure_shape(7, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::InferenceShapeMismatch);

        let err = row.ensure_shape(1, Some(&["score".to_string()])).unwrap_err();
        assert_eq!(err.code, ErrorCode::InferenceShapeMismatch);
    }

    #[test]
    fn test_feature_row_rejects_unpaired_lengths() {
        let err = FeatureRow::new(vec!["age".to_string(), "job".to_string()], vec![30.0]).unwrap_err();
        assert_eq!(err.code, ErrorCode::InferenceShapeMismatch);
        assert!(err.message.contains("2 columns for 1 values"));

        let row = FeatureRow::new(vec!["age".to_string()], vec![30.0]).unwrap();
        assert_eq!(row.len(), 1);
    }

    #[test]
    fn test_outcome_exposes_exactly_one_branch() {
        let ok = SolvencyOutcome::Solvent { credit_score: 701.5 };
        assert_eq!(ok.label(), SolvencyLabel::Solvent);
        assert_eq!(ok.credit_score(), Some(701.5));

        let rejected = SolvencyOutcome::NotSolvent;
        assert_eq!(rejected.label(), SolvencyLabel::NotSolvent);
        assert_eq!(rejected.credit_score(), None);
    }
}
