//! Delete Macros for Database Operations
//!
//! Resources are hard deleted; there is no archived state.

/// Deletes resources matching the specified field conditions.
///
/// # Arguments
/// * `$pool` - A `&PgPool`
/// * `$resource` - The resource type (must implement DatabaseResource)
/// * `$params` - Non-empty vector of `(&str, DatabaseValue)` tuples for field conditions
///
/// # Returns
/// `Result<u64, sqlx::Error>` - Number of deleted rows
///
/// # Example
/// ```ignore
/// let params = vec![("id", 42i64.into())];
/// delete_resource_where_fields!(&pool, Resource, params).await?;
/// ```
///
/// # Generated SQL
/// ```sql
/// DELETE FROM resources WHERE id = CAST($1 AS BIGINT)
/// ```
#[macro_export]
macro_rules! delete_resource_where_fields {
    ($pool:expr, $resource:ty, $params:expr) => {{
        use $crate::database::{table_name, values::DatabaseValue};

        let params: Vec<(&str, DatabaseValue)> = $params;
        async move {
            let resource_name = table_name(stringify!($resource));

            let conditions: Vec<String> = params
                .iter()
                .enumerate()
                .map(|(i, (field, value))| format!("{} = {}", field, value.placeholder(i + 1)))
                .collect();
            let query = format!(
                "DELETE FROM {} WHERE {}",
                resource_name,
                conditions.join(" AND ")
            );

            let mut query = sqlx::query(&query);
            for (_, value) in params.iter() {
                query = query.bind(value);
            }

            match query.execute($pool).await {
                Ok(result) => Ok(result.rows_affected()),
                Err(e) => Err(e),
            }
        }
    }};
}
