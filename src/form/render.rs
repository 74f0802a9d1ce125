//! Form reducer
//!
//! `render(adapter, state, event) -> (state, view)` replaces implicit
//! top-to-bottom re-execution: the host feeds one event per interaction and
//! draws whatever view comes back. Results are transient, so every event
//! starts both panels from idle and only the triggered panel is computed.

use tracing::warn;

use super::format::{format_currency, format_score};
use crate::core::adapter::InferenceAdapter;
use crate::models::types::{ApplicantRecord, LoanOutcome, ScoreInput, SolvencyOutcome};

pub const SOLVENT_MESSAGE: &str = "✅ Solvency: the applicant is solvent.";
pub const NOT_SOLVENT_MESSAGE: &str = "❌ The applicant is not solvent, no loan can be granted.";
pub const CREDIT_SCORE_PREFIX: &str = "📊 Credit score: ";
pub const LOAN_AMOUNT_PREFIX: &str = "💰 Predicted loan amount: ";

/// idle -> computing -> rendered | failed; computing never outlives a call
#[derive(Debug, Clone, PartialEq)]
pub enum PanelStatus<T> {
    Idle,
    Rendered(T),
    Failed(String),
}

impl<T> Default for PanelStatus<T> {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormState {
    pub applicant: ApplicantRecord,
    pub score_input: ScoreInput,
    pub solvency: PanelStatus<SolvencyOutcome>,
    pub loan: PanelStatus<LoanOutcome>,
}

impl FormState {
    pub fn new(applicant: ApplicantRecord, score_input: ScoreInput) -> Self {
        Self {
            applicant,
            score_input,
            ..Self::default()
        }
    }
}

/// One user interaction
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    EditApplicant(ApplicantRecord),
    EditScore(ScoreInput),
    PredictSolvency,
    PredictLoan,
}

/// One output line inside a panel
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Success(String),
    Rejection(String),
    Info(String),
    Error(String),
}

impl Block {
    pub fn text(&self) -> &str {
        match self {
            Block::Success(t) | Block::Rejection(t) | Block::Info(t) | Block::Error(t) => t,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Block::Success(_) => "result success",
            Block::Rejection(_) => "result rejection",
            Block::Info(_) => "result info",
            Block::Error(_) => "result error",
        }
    }
}

/// Output blocks of both panels
#[derive(Debug, Clone, PartialEq, Default)]
pub struct View {
    pub solvency: Vec<Block>,
    pub loan: Vec<Block>,
}

impl View {
    /// Pure projection of a state into output blocks
    pub fn of(state: &FormState) -> Self {
        let solvency = match &state.solvency {
            PanelStatus::Idle => Vec::new(),
            PanelStatus::Failed(msg) => vec![Block::Error(msg.clone())],
            PanelStatus::Rendered(SolvencyOutcome::NotSolvent) => {
                vec![Block::Rejection(NOT_SOLVENT_MESSAGE.to_string())]
            }
            PanelStatus::Rendered(SolvencyOutcome::Solvent { credit_score }) => vec![
                Block::Success(SOLVENT_MESSAGE.to_string()),
                Block::Info(format!("{}{}", CREDIT_SCORE_PREFIX, format_score(*credit_score))),
            ],
        };

        let loan = match &state.loan {
            PanelStatus::Idle => Vec::new(),
            PanelStatus::Failed(msg) => vec![Block::Error(msg.clone())],
            PanelStatus::Rendered(outcome) => vec![Block::Info(format!(
                "{}{}",
                LOAN_AMOUNT_PREFIX,
                format_currency(outcome.amount)
            ))],
        };

        Self { solvency, loan }
    }
}

/// Apply one event and produce the next state with its view
pub fn render(adapter: &InferenceAdapter, state: FormState, event: FormEvent) -> (FormState, View) {
    let mut next = FormState {
        solvency: PanelStatus::Idle,
        loan: PanelStatus::Idle,
        ..state
    };

    match event {
        FormEvent::EditApplicant(applicant) => next.applicant = applicant,
        FormEvent::EditScore(score_input) => next.score_input = score_input,
        FormEvent::PredictSolvency => {
            next.solvency = match adapter.predict_solvency(&next.applicant) {
                Ok(outcome) => PanelStatus::Rendered(outcome),
                Err(e) => {
                    warn!(code = e.code_str(), error = %e, "Solvency panel failed");
                    PanelStatus::Failed(e.to_string())
                }
            };
        }
        FormEvent::PredictLoan => {
            next.loan = match adapter.predict_loan_amount(&next.score_input) {
                Ok(outcome) => PanelStatus::Rendered(outcome),
                Err(e) => {
                    warn!(code = e.code_str(), error = %e, "Loan panel failed");
                    PanelStatus::Failed(e.to_string())
                }
            };
        }
    }

    let view = View::of(&next);
    (next, view)
}
