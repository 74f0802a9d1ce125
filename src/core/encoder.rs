//! Categorical Encoder
//!
//! Persisted category -> integer code table, one column per categorical
//! field. Codes are positions in each column's class list, the same layout a
//! fitted label encoder stores (`classes_`, sorted at fit time).
//!
//! The table is loaded once and never refit: a per-request refit over a
//! single observed value would map every category to code 0.

use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::models::errors::{AppError, AppResult};
use crate::models::types::{
    ApplicantRecord, Category, EncodedFeatureRow, Education, FeatureRow, Job, Marital, YesNo,
    APPLICANT_COLUMNS,
};

/// Columns that must be present in the table, with their form options
fn required_columns() -> Vec<(&'static str, Vec<&'static str>)> {
    let yes_no: Vec<&'static str> = YesNo::options().iter().map(|v| v.as_str()).collect();
    vec![
        (Job::COLUMN, Job::options().iter().map(|v| v.as_str()).collect()),
        (Marital::COLUMN, Marital::options().iter().map(|v| v.as_str()).collect()),
        (Education::COLUMN, Education::options().iter().map(|v| v.as_str()).collect()),
        ("housing", yes_no.clone()),
        ("loan", yes_no),
    ]
}

/// Immutable lookup table shared by every request
#[derive(Debug, Clone)]
pub struct CategoryEncoder {
    classes: BTreeMap<String, Vec<String>>,
    index: HashMap<String, HashMap<String, usize>>,
}

impl CategoryEncoder {
    /// Build from `column -> classes` as persisted alongside the models.
    ///
    /// Every form option must be present so that no valid input can miss the
    /// table at request time.
    pub fn from_classes(classes: BTreeMap<String, Vec<String>>) -> AppResult<Self> {
        let mut index = HashMap::with_capacity(classes.len());

        for (column, values) in &classes {
            let mut codes = HashMap::with_capacity(values.len());
            for (code, value) in values.iter().enumerate() {
                if codes.insert(value.clone(), code).is_some() {
                    return Err(AppError::artifact_invalid(format!(
                        "duplicate class '{}' in encoder column '{}'",
                        value, column
                    )));
                }
            }
            index.insert(column.clone(), codes);
        }

        for (column, options) in required_columns() {
            let codes = index.get(column).ok_or_else(|| {
                AppError::artifact_invalid(format!("encoder column '{}' missing", column))
            })?;
            if let Some(missing) = options.iter().find(|o| !codes.contains_key(**o)) {
                return Err(AppError::artifact_invalid(format!(
                    "encoder column '{}' has no class for '{}'",
                    column, missing
                )));
            }
        }

        Ok(Self { classes, index })
    }

    /// Table equivalent to fitting a label encoder on every form option
    pub fn from_form_options() -> Self {
        let classes: BTreeMap<String, Vec<String>> = required_columns()
            .into_iter()
            .map(|(column, options)| {
                let mut sorted: Vec<String> = options.into_iter().map(String::from).collect();
                sorted.sort();
                (column.to_string(), sorted)
            })
            .collect();

        let index = classes
            .iter()
            .map(|(column, values)| {
                let codes = values
                    .iter()
                    .enumerate()
                    .map(|(code, value)| (value.clone(), code))
                    .collect();
                (column.clone(), codes)
            })
            .collect();

        Self { classes, index }
    }

    /// Code for one category value
    pub fn code(&self, column: &str, value: &str) -> AppResult<usize> {
        self.index
            .get(column)
            .and_then(|codes| codes.get(value))
            .copied()
            .ok_or_else(|| AppError::unknown_category(column, value))
    }

    pub fn classes(&self, column: &str) -> Option<&[String]> {
        self.classes.get(column).map(Vec::as_slice)
    }

    /// Project an applicant onto the training column order
    pub fn encode(&self, record: &ApplicantRecord) -> AppResult<EncodedFeatureRow> {
        let values = vec![
            record.age as f64,
            self.code(Job::COLUMN, record.job.as_str())? as f64,
            self.code(Marital::COLUMN, record.marital.as_str())? as f64,
            self.code(Education::COLUMN, record.education.as_str())? as f64,
            record.balance as f64,
            self.code("housing", record.housing.as_str())? as f64,
            self.code("loan", record.loan.as_str())? as f64,
        ];

        debug!(?values, "Encoded applicant row");

        let columns = APPLICANT_COLUMNS.iter().map(|c| c.to_string()).collect();
        Ok(EncodedFeatureRow(FeatureRow::new(columns, values)?))
    }
}
