//! Persistence layer
//!
//! The `ResourceStore` trait is the contract the HTTP handlers use. Two
//! stores implement it:
//!
//! - `store::PgResourceStore` builds its SQL with the macro family below and
//!   runs it on a sqlx PostgreSQL pool.
//! - `memory::MemoryStore` keeps rows in process, for local runs without a
//!   database and for tests.
//!
//! ## Module Structure
//!
//! - `connection.rs` - Pool creation, schema bootstrap and store selection
//! - `traits.rs` - `DatabaseResource` trait definition
//! - `values.rs` - `DatabaseValue` enum for bound parameters
//! - `predicate.rs` - Backend-neutral filter predicates
//! - `query_macros.rs` - Macros for finding resources
//! - `insert_macros.rs` - Macros for creating resources
//! - `update_macros.rs` - Macros for updating resources
//! - `delete_macros.rs` - Macros for deleting resources
//! - `store.rs` - `ResourceStore` trait and the PostgreSQL implementation
//! - `memory.rs` - In-process implementation
//!
//! ## Quick Start
//!
//! ```ignore
//! let params = vec![("name", "Widget".into()), ("is_active", true.into())];
//! let resource = insert_resource!(&pool, Resource, params).await?;
//!
//! let params = vec![("id", resource.id.into())];
//! let found = find_one_resource_where_fields!(&pool, Resource, params).await?;
//!
//! let params = vec![("name", "Gadget".into())];
//! let updated = update_resource!(&pool, Resource, resource.id, params).await?;
//!
//! let params = vec![("id", resource.id.into())];
//! delete_resource_where_fields!(&pool, Resource, params).await?;
//! ```
//!
//! Table names are derived from the type name: `Resource` → `resources`.

use pluralizer::pluralize;

use crate::utils::strings::camel_to_snake_case;

pub mod connection;
pub mod delete_macros;
pub mod insert_macros;
pub mod memory;
pub mod predicate;
pub mod query_macros;
pub mod store;
pub mod traits;
pub mod update_macros;
pub mod values;

/// Table name for a resource type name, snake_cased and pluralised.
pub fn table_name(type_name: &str) -> String {
    pluralize(camel_to_snake_case(type_name).as_str(), 2, false)
}
