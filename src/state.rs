use deadpool_postgres::Pool;
use std::time::Duration;
use crate::config::Config;
use crate::error::Result;
use crate::middleware_layer::rate_limit::FixedWindowLimiter;
use crate::services::token::TokenService;

/// Maximum requests a single client may make within one rate-limit window.
pub const RATE_LIMIT_MAX_REQUESTS: u32 = 1000;
/// Duration of a rate-limit window.
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(15 * 60);

/// The application's state.
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool.
    pub db: Pool,
    /// The application's configuration.
    pub config: Config,
    /// The bearer token issuer/verifier.
    pub tokens: TokenService,
    /// The process-wide fixed-window rate limiter.
    pub rate_limiter: FixedWindowLimiter,
}

impl AppState {
    /// Creates a new `AppState`.
    ///
    /// # Arguments
    ///
    /// * `config` - The application's configuration.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AppState`.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = crate::db::create_pool(&config.database_url)?;
        tracing::info!("✅ PostgreSQL Pool initialized with deadpool-postgres");

        let tokens = TokenService::new(&config.token_secret);
        tracing::info!("✅ Token service initialized");

        let rate_limiter = FixedWindowLimiter::new(RATE_LIMIT_MAX_REQUESTS, RATE_LIMIT_WINDOW);
        tracing::info!(
            "✅ Rate limiter initialized ({} requests / {} min window)",
            RATE_LIMIT_MAX_REQUESTS,
            RATE_LIMIT_WINDOW.as_secs() / 60
        );

        Ok(AppState {
            db,
            config: config.clone(),
            tokens,
            rate_limiter,
        })
    }
}
