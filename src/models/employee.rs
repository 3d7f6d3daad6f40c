use serde::Serialize;

/// An employee directory record.
#[derive(Clone, Debug, Serialize)]
pub struct Employee {
    /// The identifier assigned by the store; monotonic, never reused.
    pub id: i32,
    /// The employee's name.
    pub name: String,
    /// The employee's position.
    pub position: String,
}
