//! Update Macros for Database Operations
//!
//! Macros for updating existing resources by id.

/// Updates an existing resource in the database by ID.
///
/// Only the fields in `$params` are written; every other column keeps its
/// value. The updated row is read back with `RETURNING *`.
///
/// # Arguments
/// * `$pool` - A `&PgPool`
/// * `$resource` - The resource type (must implement DatabaseResource)
/// * `$id` - The `i64` id of the row to update
/// * `$params` - Non-empty vector of `(&str, DatabaseValue)` tuples for field updates
///
/// # Returns
/// `Result<Resource, sqlx::Error>` - `sqlx::Error::RowNotFound` if no row has
/// the id
///
/// # Example
/// ```ignore
/// let params = vec![("name", "Renamed".into())];
/// let resource = update_resource!(&pool, Resource, 42, params).await?;
/// ```
///
/// # Generated SQL
/// ```sql
/// UPDATE resources SET name = $1, is_active = CAST($2 AS BOOLEAN)
/// WHERE id = CAST($3 AS BIGINT)
/// RETURNING *
/// ```
#[macro_export]
macro_rules! update_resource {
    ($pool:expr, $resource:ty, $id:expr, $params:expr) => {{
        use $crate::database::{table_name, traits::DatabaseResource, values::DatabaseValue};

        let id = DatabaseValue::Int64($id);
        let params: Vec<(&str, DatabaseValue)> = $params;
        async move {
            let resource_name = table_name(stringify!($resource));

            let assignments: Vec<String> = params
                .iter()
                .enumerate()
                .map(|(i, (field, value))| format!("{} = {}", field, value.placeholder(i + 1)))
                .collect();

            let query = format!(
                "UPDATE {} SET {} WHERE id = {} RETURNING *",
                resource_name,
                assignments.join(", "),
                id.placeholder(params.len() + 1)
            );

            let mut query = sqlx::query(&query);
            for (_, value) in params.iter() {
                query = query.bind(value);
            }
            query = query.bind(&id);

            match query.fetch_one($pool).await {
                Ok(row) => <$resource as DatabaseResource>::from_row(&row),
                Err(e) => Err(e),
            }
        }
    }};
}
