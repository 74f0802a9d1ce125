//! API Request Handlers
//!
//! The HTML handlers rebuild the whole form state from the posted fields and
//! feed one event through the reducer. The JSON handlers call the adapter
//! directly and wrap results in `ApiResponse`.

use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        Form, Json, State,
    },
    http::StatusCode,
    response::Html,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

use super::types::*;
use crate::core::adapter::InferenceAdapter;
use crate::form::{render, render_input_error, render_page, FormEvent, FormState, PanelStatus, View};
use crate::models::errors::AppError;
use crate::models::types::{ApplicantRecord, ScoreInput};
use crate::utils::telemetry::PredictionTelemetry;

/// Shared application state
pub struct AppState {
    pub adapter: Arc<InferenceAdapter>,
    pub telemetry: Arc<PredictionTelemetry>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(adapter: Arc<InferenceAdapter>, telemetry: Arc<PredictionTelemetry>) -> Self {
        Self {
            adapter,
            telemetry,
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

type ApiFailure = (StatusCode, Json<ApiResponse<()>>);

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn failure(err: &AppError, start: Instant) -> ApiFailure {
    let status = StatusCode::from_u16(err.code.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ApiResponse::error(err.into(), elapsed_ms(start))))
}

// ============================================
// HTML form
// ============================================

pub async fn index() -> Html<String> {
    let state = FormState::default();
    Html(render_page(&state, &View::of(&state)))
}

pub async fn solvency_form(
    State(state): State<Arc<AppState>>,
    form: Result<Form<FormFields>, FormRejection>,
) -> (StatusCode, Html<String>) {
    submit_form(&state, form, FormEvent::PredictSolvency)
}

pub async fn loan_form(
    State(state): State<Arc<AppState>>,
    form: Result<Form<FormFields>, FormRejection>,
) -> (StatusCode, Html<String>) {
    submit_form(&state, form, FormEvent::PredictLoan)
}

fn submit_form(
    state: &AppState,
    form: Result<Form<FormFields>, FormRejection>,
    event: FormEvent,
) -> (StatusCode, Html<String>) {
    let start = Instant::now();

    let fields = match form {
        Ok(Form(fields)) => fields,
        Err(rejection) => {
            let message = rejection.body_text();
            warn!(error = %message, "Rejected form submission");
            return (StatusCode::BAD_REQUEST, Html(render_input_error(&message)));
        }
    };

    let form_state = match fields.into_state(&event) {
        Ok(form_state) => form_state,
        Err(e) => {
            warn!(code = e.code_str(), error = %e, "Form values out of range");
            return (StatusCode::BAD_REQUEST, Html(render_input_error(&e.to_string())));
        }
    };

    let (next, view) = render(&state.adapter, form_state, event);
    record_panels(&state.telemetry, &next, start);

    (StatusCode::OK, Html(render_page(&next, &view)))
}

fn record_panels(telemetry: &PredictionTelemetry, state: &FormState, start: Instant) {
    let latency = start.elapsed();
    match &state.solvency {
        PanelStatus::Rendered(outcome) => telemetry.record_solvency(outcome, latency),
        PanelStatus::Failed(_) => telemetry.record_failure(latency),
        PanelStatus::Idle => {}
    }
    match &state.loan {
        PanelStatus::Rendered(_) => telemetry.record_loan(latency),
        PanelStatus::Failed(_) => telemetry.record_failure(latency),
        PanelStatus::Idle => {}
    }
}

// ============================================
// JSON predictions
// ============================================

pub async fn predict_solvency(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ApplicantRecord>, JsonRejection>,
) -> Result<Json<ApiResponse<SolvencyData>>, ApiFailure> {
    let start = Instant::now();

    let Json(record) = body.map_err(|rejection| {
        failure(&AppError::bad_request(rejection.body_text()), start)
    })?;
    record.validate().map_err(|e| failure(&e, start))?;

    match state.adapter.predict_solvency(&record) {
        Ok(outcome) => {
            state.telemetry.record_solvency(&outcome, start.elapsed());
            Ok(Json(ApiResponse::success(outcome.into(), elapsed_ms(start))))
        }
        Err(e) => {
            warn!(code = e.code_str(), error = %e, "Solvency prediction failed");
            state.telemetry.record_failure(start.elapsed());
            Err(failure(&e, start))
        }
    }
}

pub async fn predict_loan(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoanRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<LoanData>>, ApiFailure> {
    let start = Instant::now();

    let Json(req) = body.map_err(|rejection| {
        failure(&AppError::bad_request(rejection.body_text()), start)
    })?;
    let input = ScoreInput::new(req.credit_score).map_err(|e| failure(&e, start))?;

    match state.adapter.predict_loan_amount(&input) {
        Ok(outcome) => {
            state.telemetry.record_loan(start.elapsed());
            Ok(Json(ApiResponse::success(
                LoanData::new(&input, outcome),
                elapsed_ms(start),
            )))
        }
        Err(e) => {
            warn!(code = e.code_str(), error = %e, "Loan prediction failed");
            state.telemetry.record_failure(start.elapsed());
            Err(failure(&e, start))
        }
    }
}

// ============================================
// Health Check
// ============================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    let start = Instant::now();

    let data = HealthData {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        credit_score_features: state.adapter.credit_score_features().as_str().to_string(),
    };

    Json(ApiResponse::success(data, elapsed_ms(start)))
}

// ============================================
// Stats
// ============================================

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StatsData>> {
    let start = Instant::now();
    let predictions = state.telemetry.get_stats();

    let data = StatsData {
        approval_rate: predictions.approval_rate(),
        predictions,
        uptime_seconds: state.uptime_seconds(),
        api_version: "v1".to_string(),
    };

    Json(ApiResponse::success(data, elapsed_ms(start)))
}
