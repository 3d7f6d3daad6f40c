use garde::Validate;
use serde::Deserialize;

use crate::error::Result;
use crate::validation::report;

/// The request payload for creating or fully replacing an employee record.
///
/// Lengths are checked without trimming, so whitespace-only strings of two
/// or more characters pass. Kept as-is pending a product decision.
#[derive(Debug, Deserialize, Validate)]
pub struct EmployeePayload {
    /// The employee's name.
    #[garde(length(min = 2))]
    pub name: String,
    /// The employee's position.
    #[garde(length(min = 2))]
    pub position: String,
}

/// Validates an employee payload, accumulating every violation.
pub fn validate_employee(payload: &EmployeePayload) -> Result<()> {
    payload.validate().map_err(report::into_app_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn accepts_two_character_fields() {
        let payload = EmployeePayload {
            name: "Jo".to_string(),
            position: "En".to_string(),
        };
        assert!(validate_employee(&payload).is_ok());
    }

    #[test]
    fn rejects_one_character_name_with_details() {
        let payload = EmployeePayload {
            name: "A".to_string(),
            position: "Eng".to_string(),
        };
        match validate_employee(&payload) {
            Err(AppError::Validation(details)) => {
                assert_eq!(details.len(), 1);
                assert_eq!(details[0].field, "name");
            }
            other => panic!("expected validation failure, got {:?}", other.err()),
        }
    }

    #[test]
    fn reports_both_fields_when_both_are_short() {
        let payload = EmployeePayload {
            name: "A".to_string(),
            position: "B".to_string(),
        };
        match validate_employee(&payload) {
            Err(AppError::Validation(details)) => assert_eq!(details.len(), 2),
            other => panic!("expected validation failure, got {:?}", other.err()),
        }
    }

    #[test]
    fn whitespace_only_fields_of_length_two_pass() {
        // No trim before the length check; preserved source behavior.
        let payload = EmployeePayload {
            name: "  ".to_string(),
            position: "  ".to_string(),
        };
        assert!(validate_employee(&payload).is_ok());
    }
}
