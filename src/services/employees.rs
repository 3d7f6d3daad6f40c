use crate::{
    error::{AppError, Result},
    models::employee::Employee,
    repositories::employee as employee_repo,
    state::AppState,
};

/// Creates a new employee record.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `name` - The employee's name (already validated).
/// * `position` - The employee's position (already validated).
///
/// # Returns
///
/// A `Result` containing the created `Employee`.
pub async fn create(state: &AppState, name: &str, position: &str) -> Result<Employee> {
    employee_repo::create(&state.db, name, position).await
}

/// Lists all employee records.
///
/// # Arguments
///
/// * `state` - The application state.
///
/// # Returns
///
/// A `Result` containing a `Vec<Employee>`.
pub async fn list(state: &AppState) -> Result<Vec<Employee>> {
    employee_repo::list(&state.db).await
}

/// Gets a single employee by id.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `id` - The employee identifier.
///
/// # Returns
///
/// A `Result` containing the `Employee`, or `NotFound`.
pub async fn get(state: &AppState, id: i32) -> Result<Employee> {
    employee_repo::get_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)
}

/// Fully replaces an employee's name and position.
///
/// A concurrent delete of the same id is tolerated: the loser simply sees
/// `NotFound`.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `id` - The employee identifier.
/// * `name` - The new name (already validated).
/// * `position` - The new position (already validated).
///
/// # Returns
///
/// A `Result` containing the updated `Employee`, or `NotFound`.
pub async fn replace(state: &AppState, id: i32, name: &str, position: &str) -> Result<Employee> {
    employee_repo::replace(&state.db, id, name, position)
        .await?
        .ok_or(AppError::NotFound)
}

/// Removes an employee by id.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `id` - The employee identifier.
///
/// # Returns
///
/// A `Result<()>`, with `NotFound` if no row was deleted.
pub async fn remove(state: &AppState, id: i32) -> Result<()> {
    if !employee_repo::delete_by_id(&state.db, id).await? {
        return Err(AppError::NotFound);
    }
    Ok(())
}
