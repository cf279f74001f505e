//! Query Macros for Database Operations
//!
//! Macros for finding and retrieving resources. All macros work with any
//! struct that implements the `DatabaseResource` trait and take the pool as
//! their first argument.

/// Finds all resources matching a [`Predicate`](crate::database::predicate::Predicate).
///
/// # Arguments
/// * `$pool` - A `&PgPool`
/// * `$resource` - The resource type (must implement DatabaseResource)
/// * `$predicate` - A `&Predicate` rendered into the `WHERE` clause
/// * `$order_by` - The `ORDER BY` expression, e.g. `"created_at DESC"`
///
/// # Returns
/// `Result<Vec<Resource>, sqlx::Error>`
///
/// # Example
/// ```ignore
/// let predicate = Predicate::Equals { field: BoolField::IsActive, value: true };
/// let results =
///     find_all_resources_where!(&pool, Resource, &predicate, "created_at DESC").await?;
/// ```
///
/// # Generated SQL
/// ```sql
/// SELECT * FROM resources WHERE is_active = CAST($1 AS BOOLEAN) ORDER BY created_at DESC
/// ```
#[macro_export]
macro_rules! find_all_resources_where {
    ($pool:expr, $resource:ty, $predicate:expr, $order_by:expr) => {{
        use $crate::database::{
            predicate::Predicate, table_name, traits::DatabaseResource, values::DatabaseValue,
        };

        async {
            let resource_name = table_name(stringify!($resource));
            let predicate: &Predicate = $predicate;

            let mut values: Vec<DatabaseValue> = Vec::new();
            let mut query = format!("SELECT * FROM {}", resource_name);
            if let Some(clause) = predicate.to_sql(&mut values) {
                query.push_str(" WHERE ");
                query.push_str(&clause);
            }
            query.push_str(&format!(" ORDER BY {}", $order_by));

            let mut query = sqlx::query(&query);
            for value in values.iter() {
                query = query.bind(value);
            }

            match query.fetch_all($pool).await {
                Ok(rows) => rows
                    .iter()
                    .map(|row| <$resource as DatabaseResource>::from_row(row))
                    .collect::<Result<Vec<$resource>, _>>(),
                Err(e) => Err(e),
            }
        }
    }};
}

/// Finds a single resource matching the specified field equalities.
///
/// This macro generates a SELECT query with WHERE clauses joined by `AND`
/// and `LIMIT 1`. A missing row is `Ok(None)`, not an error.
///
/// # Arguments
/// * `$pool` - A `&PgPool`
/// * `$resource` - The resource type (must implement DatabaseResource)
/// * `$params` - Vector of `(&str, DatabaseValue)` tuples for field conditions
///
/// # Returns
/// `Result<Option<Resource>, sqlx::Error>`
///
/// # Example
/// ```ignore
/// let params = vec![("id", 42i64.into())];
/// let resource = find_one_resource_where_fields!(&pool, Resource, params).await?;
/// ```
#[macro_export]
macro_rules! find_one_resource_where_fields {
    ($pool:expr, $resource:ty, $params:expr) => {{
        use $crate::database::{table_name, traits::DatabaseResource, values::DatabaseValue};

        let params: Vec<(&str, DatabaseValue)> = $params;
        async move {
            let resource_name = table_name(stringify!($resource));

            let mut query = format!("SELECT * FROM {}", resource_name);
            if !params.is_empty() {
                query.push_str(" WHERE ");
            }
            for (i, (field, value)) in params.iter().enumerate() {
                query.push_str(&format!("{} = {}", field, value.placeholder(i + 1)));
                if i < params.len() - 1 {
                    query.push_str(" AND ");
                }
            }
            query.push_str(" LIMIT 1");

            let mut query = sqlx::query(&query);
            for (_, value) in params.iter() {
                query = query.bind(value);
            }

            match query.fetch_optional($pool).await {
                Ok(Some(row)) => <$resource as DatabaseResource>::from_row(&row).map(Some),
                Ok(None) => Ok(None),
                Err(e) => Err(e),
            }
        }
    }};
}
