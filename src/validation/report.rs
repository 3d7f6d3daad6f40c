use garde::Report;
use crate::error::{AppError, FieldViolation};

/// Flattens a `garde::Report` into the application's validation error.
///
/// Validation is total: every violated field in the report is kept, not
/// just the first one.
///
/// # Arguments
///
/// * `report` - The accumulated validation report.
///
/// # Returns
///
/// An `AppError::Validation` listing one violation per failed field.
pub fn into_app_error(report: Report) -> AppError {
    let details = report
        .iter()
        .map(|(path, error)| FieldViolation {
            field: path.to_string(),
            reason: error.to_string(),
        })
        .collect();
    AppError::Validation(details)
}
