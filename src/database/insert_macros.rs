//! Insert Macros for Database Operations
//!
//! Macros for creating new resources. Identity columns are left to the
//! database; `created_at` is filled in according to the `DatabaseResource`
//! implementation.

/// Creates a new resource in the database.
///
/// This macro generates an INSERT query and handles the managed columns:
/// - Sets `created_at` to the current time if `is_creatable()` returns true,
///   overriding a caller-supplied value
/// - Leaves `id` to the table's identity/sequence default
///
/// # Arguments
/// * `$pool` - A `&PgPool`
/// * `$resource` - The resource type (must implement DatabaseResource)
/// * `$params` - Vector of `(&str, DatabaseValue)` tuples for field values
///
/// # Returns
/// `Result<Resource, sqlx::Error>` - The created row as read back by `RETURNING *`
///
/// # Example
/// ```ignore
/// let params = vec![
///     ("name", "Widget".into()),
///     ("is_active", true.into()),
/// ];
/// let resource = insert_resource!(&pool, Resource, params).await?;
/// ```
///
/// # Generated SQL
/// ```sql
/// INSERT INTO resources (name, is_active, created_at)
/// VALUES ($1, CAST($2 AS BOOLEAN), CAST($3 AS TIMESTAMP WITH TIME ZONE))
/// RETURNING *
/// ```
#[macro_export]
macro_rules! insert_resource {
    ($pool:expr, $resource:ty, $params:expr) => {{
        use $crate::database::{table_name, traits::DatabaseResource, values::DatabaseValue};
        use time::OffsetDateTime;

        let input_params: Vec<(&str, DatabaseValue)> = $params;
        async move {
            let created_at = OffsetDateTime::now_utc();
            let resource_name = table_name(stringify!($resource));

            let mut params: Vec<(String, DatabaseValue)> = input_params
                .into_iter()
                .map(|(field, value)| (field.to_string(), value))
                .collect();

            if <$resource as DatabaseResource>::is_creatable() {
                if let Some(idx) = params.iter().position(|(field, _)| field == "created_at") {
                    params[idx] = ("created_at".to_string(), created_at.into());
                } else {
                    params.push(("created_at".to_string(), created_at.into()));
                }
            }

            let fields: Vec<&str> = params.iter().map(|(field, _)| field.as_str()).collect();
            let placeholders: Vec<String> = params
                .iter()
                .enumerate()
                .map(|(i, (_, value))| value.placeholder(i + 1))
                .collect();

            let query = format!(
                "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
                resource_name,
                fields.join(", "),
                placeholders.join(", ")
            );

            let mut query = sqlx::query(&query);
            for (_, value) in params.iter() {
                query = query.bind(value);
            }

            match query.fetch_one($pool).await {
                Ok(row) => <$resource as DatabaseResource>::from_row(&row),
                Err(e) => {
                    log::error!("[insert_resource] Failed to insert {}: {:?}", resource_name, e);
                    Err(e)
                }
            }
        }
    }};
}
