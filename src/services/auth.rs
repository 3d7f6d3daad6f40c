use crate::error::{AppError, Result};
use crate::models::credential::Credential;
use crate::repositories::credential as credential_repo;
use deadpool_postgres::Pool;
use argon2::{
    Argon2, ParamsBuilder,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use zeroize::Zeroize;

/// The memory cost for Argon2 in MB.
const ARGON2_MEMORY_MB: u32 = 19;
/// The number of iterations for Argon2.
const ARGON2_ITERATIONS: u32 = 3;
/// The parallelism factor for Argon2.
const ARGON2_PARALLELISM: u32 = 1;

/// Hashes a password using Argon2id.
///
/// A fresh random salt is generated per call, so two hashes of the same
/// plaintext differ.
///
/// # Arguments
///
/// * `password` - The password to hash.
///
/// # Returns
///
/// A `Result` containing the hashed password.
pub fn hash_password(password: &str) -> Result<String> {
    let mut password_bytes = password.as_bytes().to_vec();

    let salt = SaltString::generate(&mut OsRng);

    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        ParamsBuilder::new()
            .m_cost(ARGON2_MEMORY_MB * 1024)
            .t_cost(ARGON2_ITERATIONS)
            .p_cost(ARGON2_PARALLELISM)
            .build()
            .map_err(|e| AppError::Hashing(format!("Argon2 params: {}", e)))?,
    );

    let password_hash = argon2
        .hash_password(&password_bytes, &salt)
        .map_err(|e| AppError::Hashing(format!("Argon2 hash error: {}", e)))?
        .to_string();

    password_bytes.zeroize();
    tracing::debug!("Password hashed successfully with Argon2");
    Ok(password_hash)
}

/// Verifies a password against a hash.
///
/// The salt and parameters are recovered from the encoded hash; the
/// comparison itself is constant-time inside the argon2 crate.
///
/// # Arguments
///
/// * `password` - The password to verify.
/// * `hash` - The hash to verify against.
///
/// # Returns
///
/// A `Result` containing `true` if the password is valid, `false` otherwise.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let mut password_bytes = password.as_bytes().to_vec();
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Hashing(format!("Hash parse error: {}", e)))?;
    let argon2 = Argon2::default();
    let result = argon2.verify_password(&password_bytes, &parsed_hash).is_ok();

    password_bytes.zeroize();
    Ok(result)
}

/// Registers a new credential.
///
/// The pre-insert lookup gives a friendly `Conflict` for the common case;
/// the unique constraint in the store settles the concurrent-registration
/// race and is mapped to `Conflict` as well.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `email` - The email address to register.
/// * `password` - The plaintext password.
///
/// # Returns
///
/// A `Result` containing the created `Credential`.
pub async fn register(db: &Pool, email: &str, password: &str) -> Result<Credential> {
    tracing::debug!("🔐 Registering credential: {}", email);

    if credential_repo::find_by_email(db, email).await?.is_some() {
        return Err(AppError::Conflict("Email is already registered".to_string()));
    }

    let password_hash = hash_password(password)?;
    let credential = credential_repo::insert(db, email, &password_hash).await?;

    tracing::info!("✅ Credential created with ID: {}", credential.id);
    Ok(credential)
}

/// Authenticates a credential by email and password.
///
/// Unknown email and wrong password both produce the same message so the
/// response does not reveal which half failed.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `email` - The email address.
/// * `password` - The plaintext password.
///
/// # Returns
///
/// A `Result` containing the authenticated `Credential`.
pub async fn authenticate(db: &Pool, email: &str, password: &str) -> Result<Credential> {
    tracing::debug!("🔐 Authenticating credential: {}", email);

    let credential = credential_repo::find_by_email(db, email)
        .await?
        .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

    if !verify_password(password, &credential.password_hash)? {
        return Err(AppError::Authentication(
            "Invalid email or password".to_string(),
        ));
    }

    tracing::info!("✅ Credential authenticated: {}", credential.id);
    Ok(credential)
}
