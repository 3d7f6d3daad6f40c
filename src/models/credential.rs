use chrono::{DateTime, Utc};

/// A stored login credential.
///
/// The password hash is opaque Argon2 output and is never serialized into a
/// response body.
#[derive(Clone, Debug)]
pub struct Credential {
    /// The unique identifier for the credential.
    pub id: i32,
    /// The registered email address (globally unique).
    pub email: String,
    /// The salted Argon2 hash of the password.
    pub password_hash: String,
    /// The timestamp when the credential was created.
    pub created_at: DateTime<Utc>,
}
