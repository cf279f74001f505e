//! Database Resource Traits
//!
//! Any struct passed to the database macros implements `DatabaseResource`,
//! which tells the macros how to read a row back and which columns they
//! manage on the caller's behalf.

use sqlx::{Error, postgres::PgRow};

/// Row mapping and column metadata for a table-backed struct.
///
/// # Example Implementation
///
/// ```ignore
/// impl DatabaseResource for Resource {
///     fn from_row(row: &PgRow) -> Result<Self, Error> {
///         Ok(Resource {
///             id: row.try_get("id")?,
///             name: row.try_get("name")?,
///             // ...
///         })
///     }
///
///     fn is_creatable() -> bool { true }
/// }
/// ```
pub trait DatabaseResource {
    /// Converts a database row to the implementing struct.
    ///
    /// Use `row.try_get()` so a missing or mistyped column surfaces as an
    /// `Error` instead of a panic.
    fn from_row(row: &PgRow) -> Result<Self, Error>
    where
        Self: Sized;

    /// Whether the resource has a `created_at` timestamp.
    ///
    /// When `true`, `insert_resource!` sets `created_at` to the current time,
    /// replacing any caller-supplied value.
    fn is_creatable() -> bool;
}
