//! Telemetry Module
//!
//! In-process prediction counters for the stats endpoint and the shutdown
//! summary. Counts only; no applicant data is retained.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::models::types::SolvencyOutcome;

/// Aggregated statistics for reporting
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct TelemetryStats {
    /// Solvency runs that produced an outcome
    pub solvency_predictions: u64,
    pub solvent: u64,
    pub not_solvent: u64,
    /// Loan runs that produced an amount
    pub loan_predictions: u64,
    /// Runs that ended in an inference error
    pub failures: u64,
    /// Average latency over every recorded run (ms)
    pub avg_latency_ms: f64,
    /// Session start timestamp
    pub period_start: u64,
}

impl TelemetryStats {
    /// Share of solvency predictions that were solvent (0.0 when none)
    pub fn approval_rate(&self) -> f64 {
        if self.solvency_predictions == 0 {
            0.0
        } else {
            self.solvent as f64 / self.solvency_predictions as f64
        }
    }
}

/// Lock-free counters shared by every request
pub struct PredictionTelemetry {
    solvent: AtomicU64,
    not_solvent: AtomicU64,
    loan_predictions: AtomicU64,
    failures: AtomicU64,
    total_latency_us: AtomicU64,
    session_start: u64,
}

impl Default for PredictionTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionTelemetry {
    pub fn new() -> Self {
        Self {
            solvent: AtomicU64::new(0),
            not_solvent: AtomicU64::new(0),
            loan_predictions: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            total_latency_us: AtomicU64::new(0),
            session_start: current_timestamp(),
        }
    }

    /// Record a completed solvency prediction
    pub fn record_solvency(&self, outcome: &SolvencyOutcome, latency: Duration) {
        match outcome {
            SolvencyOutcome::Solvent { .. } => self.solvent.fetch_add(1, Ordering::Relaxed),
            SolvencyOutcome::NotSolvent => self.not_solvent.fetch_add(1, Ordering::Relaxed),
        };
        self.add_latency(latency);
    }

    /// Record a completed loan prediction
    pub fn record_loan(&self, latency: Duration) {
        self.loan_predictions.fetch_add(1, Ordering::Relaxed);
        self.add_latency(latency);
    }

    /// Record a run that failed inside inference
    pub fn record_failure(&self, latency: Duration) {
        self.failures.fetch_add(1, Ordering::Relaxed);
        self.add_latency(latency);
    }

    fn add_latency(&self, latency: Duration) {
        let micros = u64::try_from(latency.as_micros()).unwrap_or(u64::MAX);
        self.total_latency_us.fetch_add(micros, Ordering::Relaxed);
    }

    /// Get current statistics
    pub fn get_stats(&self) -> TelemetryStats {
        let solvent = self.solvent.load(Ordering::Relaxed);
        let not_solvent = self.not_solvent.load(Ordering::Relaxed);
        let loan_predictions = self.loan_predictions.load(Ordering::Relaxed);
        let failures = self.failures.load(Ordering::Relaxed);
        let total_latency_us = self.total_latency_us.load(Ordering::Relaxed);

        let runs = solvent + not_solvent + loan_predictions + failures;
        let avg_latency_ms = if runs > 0 {
            total_latency_us as f64 / runs as f64 / 1000.0
        } else {
            0.0
        };

        TelemetryStats {
            solvency_predictions: solvent + not_solvent,
            solvent,
            not_solvent,
            loan_predictions,
            failures,
            avg_latency_ms,
            period_start: self.session_start,
        }
    }
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_by_outcome() {
        let telemetry = PredictionTelemetry::new();
        telemetry.record_solvency(
            &SolvencyOutcome::Solvent { credit_score: 700.0 },
            Duration::from_millis(2),
        );
        telemetry.record_solvency(&SolvencyOutcome::NotSolvent, Duration::from_millis(4));
        telemetry.record_loan(Duration::from_millis(3));
        telemetry.record_failure(Duration::from_millis(3));

        let stats = telemetry.get_stats();
        assert_eq!(stats.solvency_predictions, 2);
        assert_eq!(stats.solvent, 1);
        assert_eq!(stats.not_solvent, 1);
        assert_eq!(stats.loan_predictions, 1);
        assert_eq!(stats.failures, 1);
        assert!((stats.avg_latency_ms - 3.0).abs() < 1e-9);
        assert!((stats.approval_rate() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_stats() {
        let stats = PredictionTelemetry::new().get_stats();
        assert_eq!(stats.solvency_predictions, 0);
        assert_eq!(stats.avg_latency_ms, 0.0);
        assert_eq!(stats.approval_rate(), 0.0);
    }
}
