//! Configuration module for the loan predictor
//!
//! All settings come from environment variables with defaults, read once at
//! startup.

use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, warn};

use super::errors::{AppError, AppResult};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ARTIFACTS_DIR: &str = "./artifacts";

/// Which feature row the credit-score regressor receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreditScoreFeatures {
    /// Encoded row before scaling (reproduces the deployed wiring)
    #[default]
    Unscaled,
    /// Same scaled row the solvency classifier sees
    Scaled,
}

impl CreditScoreFeatures {
    pub fn parse(value: &str) -> AppResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "unscaled" => Ok(Self::Unscaled),
            "scaled" => Ok(Self::Scaled),
            other => Err(AppError::invalid_config("LOAN_CREDIT_SCORE_FEATURES", other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unscaled => "unscaled",
            Self::Scaled => "scaled",
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the five model artifacts
    pub artifacts_dir: PathBuf,
    pub credit_score_features: CreditScoreFeatures,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            artifacts_dir: PathBuf::from(DEFAULT_ARTIFACTS_DIR),
            credit_score_features: CreditScoreFeatures::default(),
        }
    }
}

impl AppConfig {
    /// Load from the process environment
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (the environment in production)
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("LOAN_HOST").unwrap_or(defaults.host);

        // Hosting platforms set PORT, fallback to LOAN_PORT for local dev
        let port = match lookup("PORT").or_else(|| lookup("LOAN_PORT")) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::invalid_config("PORT", &raw))?,
            None => defaults.port,
        };

        let artifacts_dir = lookup("LOAN_ARTIFACTS_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.artifacts_dir);

        let credit_score_features = match lookup("LOAN_CREDIT_SCORE_FEATURES") {
            Some(raw) => CreditScoreFeatures::parse(&raw)?,
            None => defaults.credit_score_features,
        };

        let config = Self {
            host,
            port,
            artifacts_dir,
            credit_score_features,
        };
        config.log_summary();
        Ok(config)
    }

    pub fn socket_addr(&self) -> AppResult<SocketAddr> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .map_err(|_| AppError::invalid_config("LOAN_HOST", &self.host))
    }

    fn log_summary(&self) {
        info!(
            host = %self.host,
            port = self.port,
            artifacts_dir = %self.artifacts_dir.display(),
            credit_score_features = self.credit_score_features.as_str(),
            "⚙️ Configuration loaded"
        );
        if self.credit_score_features == CreditScoreFeatures::Scaled {
            warn!("⚠️ Credit-score model will receive scaled features; deployed models were wired with unscaled rows");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::ErrorCode;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.artifacts_dir, PathBuf::from("./artifacts"));
        assert_eq!(config.credit_score_features, CreditScoreFeatures::Unscaled);
    }

    #[test]
    fn test_port_precedence() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("PORT", "9000"), ("LOAN_PORT", "9100")])).unwrap();
        assert_eq!(config.port, 9000);

        let config = AppConfig::from_lookup(lookup_from(&[("LOAN_PORT", "9100")])).unwrap();
        assert_eq!(config.port, 9100);
    }

    #[test]
    fn test_invalid_values() {
        let err = AppConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);

        let err = AppConfig::from_lookup(lookup_from(&[("LOAN_CREDIT_SCORE_FEATURES", "both")]))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
    }

    #[test]
    fn test_credit_score_features_parse() {
        assert_eq!(CreditScoreFeatures::parse("SCALED").unwrap(), CreditScoreFeatures::Scaled);
        assert_eq!(CreditScoreFeatures::parse(" unscaled ").unwrap(), CreditScoreFeatures::Unscaled);
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            ..AppConfig::default()
        };
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:3000");
    }
}
