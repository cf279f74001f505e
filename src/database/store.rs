use sqlx::PgPool;

use crate::{
    database::{predicate::Predicate, values::DatabaseValue},
    delete_resource_where_fields, find_all_resources_where, find_one_resource_where_fields,
    insert_resource,
    models::resource::{CreateRecord, Resource, UpdateRecord},
    update_resource,
};

/// The persistence collaborator behind the resource endpoints.
///
/// Implementations own their consistency guarantees; callers do not retry.
#[rocket::async_trait]
pub trait ResourceStore: Send + Sync {
    /// Inserts a record, assigning `id` and `created_at`.
    async fn create(&self, record: CreateRecord) -> anyhow::Result<Resource>;

    /// All resources matching `predicate`, newest first. Resources created
    /// at the same instant are ordered by descending id.
    async fn find_many(&self, predicate: &Predicate) -> anyhow::Result<Vec<Resource>>;

    async fn find_unique(&self, id: i64) -> anyhow::Result<Option<Resource>>;

    /// Applies the fields present in `record` and returns the updated row.
    async fn update(&self, id: i64, record: UpdateRecord) -> anyhow::Result<Resource>;

    /// Hard deletes the row. Deleting a missing id is not an error.
    async fn delete(&self, id: i64) -> anyhow::Result<()>;
}

pub struct PgResourceStore {
    pool: PgPool,
}

impl PgResourceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[rocket::async_trait]
impl ResourceStore for PgResourceStore {
    async fn create(&self, record: CreateRecord) -> anyhow::Result<Resource> {
        match insert_resource!(&self.pool, Resource, record.params()).await {
            Ok(resource) => Ok(resource),
            Err(e) => {
                log::error!("[PgResourceStore::create] Failed to create resource: {:?}", e);
                Err(e.into())
            }
        }
    }

    async fn find_many(&self, predicate: &Predicate) -> anyhow::Result<Vec<Resource>> {
        match find_all_resources_where!(&self.pool, Resource, predicate, "created_at DESC, id DESC")
            .await
        {
            Ok(resources) => Ok(resources),
            Err(e) => {
                log::error!("[PgResourceStore::find_many] Failed to list resources: {:?}", e);
                Err(e.into())
            }
        }
    }

    async fn find_unique(&self, id: i64) -> anyhow::Result<Option<Resource>> {
        let params: Vec<(&str, DatabaseValue)> = vec![("id", id.into())];
        match find_one_resource_where_fields!(&self.pool, Resource, params).await {
            Ok(resource) => Ok(resource),
            Err(e) => {
                log::error!("[PgResourceStore::find_unique] Failed to get resource {}: {:?}", id, e);
                Err(e.into())
            }
        }
    }

    async fn update(&self, id: i64, record: UpdateRecord) -> anyhow::Result<Resource> {
        let params = record.params();
        if params.is_empty() {
            return match self.find_unique(id).await? {
                Some(resource) => Ok(resource),
                None => Err(sqlx::Error::RowNotFound.into()),
            };
        }
        match update_resource!(&self.pool, Resource, id, params).await {
            Ok(resource) => Ok(resource),
            Err(e) => {
                log::error!("[PgResourceStore::update] Failed to update resource {}: {:?}", id, e);
                Err(e.into())
            }
        }
    }

    async fn delete(&self, id: i64) -> anyhow::Result<()> {
        let params: Vec<(&str, DatabaseValue)> = vec![("id", id.into())];
        match delete_resource_where_fields!(&self.pool, Resource, params).await {
            Ok(_) => Ok(()),
            Err(e) => {
                log::error!("[PgResourceStore::delete] Failed to delete resource {}: {:?}", id, e);
                Err(e.into())
            }
        }
    }
}
