use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
};

use http::{HeaderValue, Method, header};
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};

use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod extract;
mod state;
mod db;

mod models {
    pub mod credential;
    pub mod employee;
}

mod repositories {
    pub mod credential;
    pub mod employee;
}

mod services {
    pub mod auth;
    pub mod employees;
    pub mod token;
}

mod handlers {
    pub mod auth;
    pub mod employees;
}

mod middleware_layer {
    pub mod auth;
    pub mod rate_limit;
}

mod validation {
    pub mod auth;
    pub mod employee;
    pub mod report;
}

use anyhow::Context;
use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    tracing::info!("✅ Configuration loaded successfully");

    let state = AppState::new(&config).await?;
    tracing::info!("✅ AppState initialized");

    // Tables are created idempotently on every startup.
    db::init_schema(&state.db).await?;
    tracing::info!("✅ Database schema ensured");

    let allowed_origin: HeaderValue = config
        .cors_origin
        .parse()
        .context("CORS_ORIGIN must be a valid origin")?;

    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true)
        .max_age(Duration::from_secs(86400));

    let public_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/employees", get(handlers::employees::list_employees))
        .route("/employees/{id}", get(handlers::employees::get_employee))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/employees", post(handlers::employees::create_employee))
        .route("/employees/{id}", put(handlers::employees::update_employee))
        .route(
            "/employees/{id}",
            delete(handlers::employees::delete_employee),
        )
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::auth::require_auth,
        ))
        .with_state(state.clone());

    // Layer order (outermost first at runtime): rate limiter, request
    // tracing, CORS, then routing.
    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default())
                .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                .on_response(DefaultOnResponse::default().level(Level::DEBUG))
                .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
        )
        .layer(from_fn_with_state(
            state.clone(),
            middleware_layer::rate_limit::rate_limit,
        ));

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
