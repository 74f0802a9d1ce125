//! API Request/Response Types

use serde::{Deserialize, Serialize};

use crate::form::{format_currency, format_score, FormEvent, FormState};
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{
    ApplicantRecord, Education, Job, LoanOutcome, Marital, ScoreInput, SolvencyLabel,
    SolvencyOutcome, YesNo,
};
use crate::utils::telemetry::TelemetryStats;

/// API Response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    pub latency_ms: f64,
    pub timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, latency_ms: f64) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(error: ApiError, latency_ms: f64) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// API Error
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&AppError> for ApiError {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code_str().to_string(),
            message: err.message.clone(),
            details: std::error::Error::source(err).map(|s| s.to_string()),
        }
    }
}

// ============================================
// Form submission (both panels share one form)
// ============================================

/// Every field of the page, posted by either button
#[derive(Debug, Deserialize)]
pub struct FormFields {
    pub age: i64,
    pub job: Job,
    pub marital: Marital,
    pub education: Education,
    pub balance: i64,
    pub housing: YesNo,
    pub loan: YesNo,
    #[serde(default)]
    pub credit_score: f64,
}

impl FormFields {
    /// Rebuild the form state for `event`, re-checking widget bounds of the
    /// triggered panel only. The other panel's values are carried as submitted.
    pub fn into_state(self, event: &FormEvent) -> AppResult<FormState> {
        let applicant = ApplicantRecord {
            age: self.age,
            job: self.job,
            marital: self.marital,
            education: self.education,
            balance: self.balance,
            housing: self.housing,
            loan: self.loan,
        };
        let score_input = ScoreInput {
            credit_score: self.credit_score,
        };

        match event {
            FormEvent::PredictSolvency | FormEvent::EditApplicant(_) => applicant.validate()?,
            FormEvent::PredictLoan | FormEvent::EditScore(_) => score_input.validate()?,
        }
        Ok(FormState::new(applicant, score_input))
    }
}

// ============================================
// Solvency prediction
// ============================================

#[derive(Debug, Serialize)]
pub struct SolvencyData {
    pub label: SolvencyLabel,
    pub solvent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_score: Option<f64>,
    /// Two-decimal rendering of `credit_score`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_score_display: Option<String>,
}

impl From<SolvencyOutcome> for SolvencyData {
    fn from(outcome: SolvencyOutcome) -> Self {
        let credit_score = outcome.credit_score();
        Self {
            label: outcome.label(),
            solvent: outcome.label() == SolvencyLabel::Solvent,
            credit_score,
            credit_score_display: credit_score.map(format_score),
        }
    }
}

// ============================================
// Loan amount prediction
// ============================================

#[derive(Debug, Deserialize)]
pub struct LoanRequest {
    pub credit_score: f64,
}

#[derive(Debug, Serialize)]
pub struct LoanData {
    pub credit_score: f64,
    pub amount: f64,
    /// Currency rendering, e.g. `15,000.50$`
    pub amount_display: String,
}

impl LoanData {
    pub fn new(input: &ScoreInput, outcome: LoanOutcome) -> Self {
        Self {
            credit_score: input.credit_score,
            amount: outcome.amount,
            amount_display: format_currency(outcome.amount),
        }
    }
}

// ============================================
// Stats / Telemetry
// ============================================

#[derive(Debug, Serialize)]
pub struct StatsData {
    #[serde(flatten)]
    pub predictions: TelemetryStats,
    pub approval_rate: f64,
    pub uptime_seconds: u64,
    pub api_version: String,
}

// ============================================
// Health Check
// ============================================

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub credit_score_features: String,
}
