use deadpool_postgres::Pool;
use tokio_postgres::Row;
use tokio_postgres::error::SqlState;
use crate::{
    error::{AppError, Result},
    models::credential::Credential,
};

/// A helper function to map a `tokio_postgres::Row` to a `Credential`.
fn row_to_credential(row: &Row) -> Result<Credential> {
    Ok(Credential {
        id: row.try_get("id").map_err(|_| AppError::MissingData("id".to_string()))?,
        email: row.try_get("email").map_err(|_| AppError::MissingData("email".to_string()))?,
        password_hash: row.try_get("password_hash").map_err(|_| AppError::MissingData("password_hash".to_string()))?,
        created_at: row.try_get("created_at").map_err(|_| AppError::MissingData("created_at".to_string()))?,
    })
}

/// Finds a credential by its email address.
///
/// # Arguments
///
/// * `pool` - The database connection pool.
/// * `email` - The email address to look up.
///
/// # Returns
///
/// A `Result` containing an `Option<Credential>`.
pub async fn find_by_email(pool: &Pool, email: &str) -> Result<Option<Credential>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            r#"
            SELECT id, email, password_hash, created_at
            FROM credentials
            WHERE email = $1
            "#,
            &[&email],
        )
        .await?;
    row.map(|r| row_to_credential(&r)).transpose()
}

/// Inserts a new credential.
///
/// The unique constraint on `email` is the final arbiter against concurrent
/// duplicate registrations; a unique violation is reported as `Conflict`
/// rather than a generic database error.
///
/// # Arguments
///
/// * `pool` - The database connection pool.
/// * `email` - The email address to register.
/// * `password_hash` - The opaque password hash.
///
/// # Returns
///
/// A `Result` containing the created `Credential`.
pub async fn insert(pool: &Pool, email: &str, password_hash: &str) -> Result<Credential> {
    let client = pool.get().await?;
    let row = client
        .query_one(
            r#"
            INSERT INTO credentials (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            "#,
            &[&email, &password_hash],
        )
        .await
        .map_err(|e| {
            if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
                AppError::Conflict("Email is already registered".to_string())
            } else {
                AppError::Database(e)
            }
        })?;
    row_to_credential(&row)
}
