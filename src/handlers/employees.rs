use axum::{
    Extension,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{
    error::Result,
    extract::{Json, Path},
    middleware_layer::auth::AuthSubject,
    services::employees as employee_service,
    state::AppState,
    validation::employee::{EmployeePayload, validate_employee},
};

/// Creates a new employee record.
#[axum::debug_handler]
pub async fn create_employee(
    State(state): State<AppState>,
    Extension(subject): Extension<AuthSubject>,
    Json(payload): Json<EmployeePayload>,
) -> Result<Response> {
    validate_employee(&payload)?;

    let employee = employee_service::create(&state, &payload.name, &payload.position).await?;
    tracing::info!("✅ Employee {} created by subject {}", employee.id, subject.0);

    Ok((StatusCode::CREATED, Json(employee)).into_response())
}

/// Lists all employee records.
#[axum::debug_handler]
pub async fn list_employees(State(state): State<AppState>) -> Result<Response> {
    let employees = employee_service::list(&state).await?;
    Ok((StatusCode::OK, Json(employees)).into_response())
}

/// Gets a single employee record.
#[axum::debug_handler]
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response> {
    let employee = employee_service::get(&state, id).await?;
    Ok((StatusCode::OK, Json(employee)).into_response())
}

/// Fully replaces an employee's name and position.
#[axum::debug_handler]
pub async fn update_employee(
    State(state): State<AppState>,
    Extension(subject): Extension<AuthSubject>,
    Path(id): Path<i32>,
    Json(payload): Json<EmployeePayload>,
) -> Result<Response> {
    validate_employee(&payload)?;

    let employee =
        employee_service::replace(&state, id, &payload.name, &payload.position).await?;
    tracing::info!("✅ Employee {} updated by subject {}", employee.id, subject.0);

    Ok((StatusCode::OK, Json(employee)).into_response())
}

/// Deletes an employee record.
#[axum::debug_handler]
pub async fn delete_employee(
    State(state): State<AppState>,
    Extension(subject): Extension<AuthSubject>,
    Path(id): Path<i32>,
) -> Result<Response> {
    employee_service::remove(&state, id).await?;
    tracing::info!("✅ Employee {} deleted by subject {}", id, subject.0);

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        r#"{"message":"Employee deleted successfully"}"#,
    )
        .into_response())
}
