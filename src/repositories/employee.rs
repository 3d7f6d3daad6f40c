use deadpool_postgres::Pool;
use tokio_postgres::Row;
use crate::{
    error::{AppError, Result},
    models::employee::Employee,
};

/// A helper function to map a `tokio_postgres::Row` to an `Employee`.
fn row_to_employee(row: &Row) -> Result<Employee> {
    Ok(Employee {
        id: row.try_get("id").map_err(|_| AppError::MissingData("id".to_string()))?,
        name: row.try_get("name").map_err(|_| AppError::MissingData("name".to_string()))?,
        position: row.try_get("position").map_err(|_| AppError::MissingData("position".to_string()))?,
    })
}

/// Creates a new employee record.
///
/// The identifier is assigned by the store's sequence and is never reused,
/// even after deletion.
///
/// # Arguments
///
/// * `pool` - The database connection pool.
/// * `name` - The employee's name.
/// * `position` - The employee's position.
///
/// # Returns
///
/// A `Result` containing the created `Employee` including its assigned id.
pub async fn create(pool: &Pool, name: &str, position: &str) -> Result<Employee> {
    let client = pool.get().await?;
    let row = client
        .query_one(
            r#"
            INSERT INTO employees (name, position)
            VALUES ($1, $2)
            RETURNING id, name, position
            "#,
            &[&name, &position],
        )
        .await?;
    row_to_employee(&row)
}

/// Lists all employee records in store-native order.
///
/// # Arguments
///
/// * `pool` - The database connection pool.
///
/// # Returns
///
/// A `Result` containing a `Vec<Employee>`.
pub async fn list(pool: &Pool) -> Result<Vec<Employee>> {
    let client = pool.get().await?;
    let rows = client
        .query(
            r#"
            SELECT id, name, position
            FROM employees
            "#,
            &[],
        )
        .await?;
    rows.iter().map(row_to_employee).collect()
}

/// Finds an employee by id.
///
/// # Arguments
///
/// * `pool` - The database connection pool.
/// * `id` - The employee identifier.
///
/// # Returns
///
/// A `Result` containing an `Option<Employee>`.
pub async fn get_by_id(pool: &Pool, id: i32) -> Result<Option<Employee>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            r#"
            SELECT id, name, position
            FROM employees
            WHERE id = $1
            "#,
            &[&id],
        )
        .await?;
    row.map(|r| row_to_employee(&r)).transpose()
}

/// Fully replaces an employee's name and position.
///
/// Idempotent: succeeds even when the new values equal the old ones.
///
/// # Arguments
///
/// * `pool` - The database connection pool.
/// * `id` - The employee identifier.
/// * `name` - The new name.
/// * `position` - The new position.
///
/// # Returns
///
/// A `Result` containing `Some(Employee)` with the updated record, or `None`
/// if no row with that id exists.
pub async fn replace(
    pool: &Pool,
    id: i32,
    name: &str,
    position: &str,
) -> Result<Option<Employee>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            r#"
            UPDATE employees
            SET name = $2, position = $3
            WHERE id = $1
            RETURNING id, name, position
            "#,
            &[&id, &name, &position],
        )
        .await?;
    row.map(|r| row_to_employee(&r)).transpose()
}

/// Deletes an employee by id.
///
/// # Arguments
///
/// * `pool` - The database connection pool.
/// * `id` - The employee identifier.
///
/// # Returns
///
/// A `Result` containing `true` if a row was deleted, `false` otherwise.
pub async fn delete_by_id(pool: &Pool, id: i32) -> Result<bool> {
    let client = pool.get().await?;
    let deleted = client
        .execute(
            r#"
            DELETE FROM employees
            WHERE id = $1
            "#,
            &[&id],
        )
        .await?;
    Ok(deleted > 0)
}
