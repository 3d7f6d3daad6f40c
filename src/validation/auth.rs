use garde::Validate;
use serde::Deserialize;

use crate::error::Result;
use crate::validation::report;

/// The request payload for credential registration.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterPayload {
    /// The email address to register.
    #[garde(email)]
    pub email: String,
    /// The plaintext password; strength is only enforced at registration.
    #[garde(length(min = 6))]
    pub password: String,
}

/// The request payload for login. Only presence of the password is checked
/// here, not strength.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginPayload {
    /// The registered email address.
    #[garde(email)]
    pub email: String,
    /// The plaintext password.
    #[garde(length(min = 1))]
    pub password: String,
}

/// Validates a registration payload, accumulating every violation.
pub fn validate_register(payload: &RegisterPayload) -> Result<()> {
    payload.validate().map_err(report::into_app_error)?;
    Ok(())
}

/// Validates a login payload, accumulating every violation.
pub fn validate_login(payload: &LoginPayload) -> Result<()> {
    payload.validate().map_err(report::into_app_error)?;
    Ok(())
}
