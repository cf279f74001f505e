//! In-process `ResourceStore`.
//!
//! Rows live in a vector behind a `tokio::sync::RwLock`; ids come from a
//! counter that never reuses a value, even after deletes.

use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::{
    database::{predicate::Predicate, store::ResourceStore},
    models::resource::{CreateRecord, Resource, UpdateRecord},
};

#[derive(Default)]
struct MemoryState {
    last_id: i64,
    rows: Vec<Resource>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[rocket::async_trait]
impl ResourceStore for MemoryStore {
    async fn create(&self, record: CreateRecord) -> anyhow::Result<Resource> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let resource = Resource {
            id: state.last_id,
            name: record.name,
            description: record.description,
            tags_csv: record.tags_csv,
            is_active: record.is_active,
            created_at: OffsetDateTime::now_utc(),
        };
        state.rows.push(resource.clone());
        Ok(resource)
    }

    async fn find_many(&self, predicate: &Predicate) -> anyhow::Result<Vec<Resource>> {
        let state = self.state.read().await;
        let mut resources: Vec<Resource> = state
            .rows
            .iter()
            .filter(|resource| predicate.matches(resource))
            .cloned()
            .collect();
        resources.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(resources)
    }

    async fn find_unique(&self, id: i64) -> anyhow::Result<Option<Resource>> {
        let state = self.state.read().await;
        Ok(state.rows.iter().find(|resource| resource.id == id).cloned())
    }

    async fn update(&self, id: i64, record: UpdateRecord) -> anyhow::Result<Resource> {
        let mut state = self.state.write().await;
        match state.rows.iter_mut().find(|resource| resource.id == id) {
            Some(resource) => {
                record.apply(resource);
                Ok(resource.clone())
            }
            None => Err(anyhow::anyhow!("Resource {} does not exist", id)),
        }
    }

    async fn delete(&self, id: i64) -> anyhow::Result<()> {
        let mut state = self.state.write().await;
        state.rows.retain(|resource| resource.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::predicate::{BoolField, TextField};

    fn record(name: &str, tags_csv: &str, is_active: bool) -> CreateRecord {
        CreateRecord {
            name: name.to_string(),
            description: String::new(),
            tags_csv: tags_csv.to_string(),
            is_active,
        }
    }

    #[rocket::async_test]
    async fn assigns_increasing_ids() {
        let store = MemoryStore::new();
        let first = store.create(record("a", "", true)).await.unwrap();
        let second = store.create(record("b", "", true)).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        store.delete(second.id).await.unwrap();
        let third = store.create(record("c", "", true)).await.unwrap();
        assert_eq!(third.id, 3);
    }

    #[rocket::async_test]
    async fn lists_newest_first() {
        let store = MemoryStore::new();
        for name in ["first", "second", "third"] {
            store.create(record(name, "", true)).await.unwrap();
        }
        let names: Vec<String> = store
            .find_many(&Predicate::MatchAll)
            .await
            .unwrap()
            .into_iter()
            .map(|resource| resource.name)
            .collect();
        assert_eq!(names, vec!["third", "second", "first"]);
    }

    #[rocket::async_test]
    async fn filters_with_predicate() {
        let store = MemoryStore::new();
        store.create(record("Widget", ",x,", true)).await.unwrap();
        store.create(record("Gadget", ",y,", false)).await.unwrap();

        let inactive = Predicate::Equals {
            field: BoolField::IsActive,
            value: false,
        };
        let found = store.find_many(&inactive).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Gadget");

        let tagged = Predicate::Contains {
            field: TextField::TagsCsv,
            needle: ",x,".to_string(),
        };
        let found = store.find_many(&tagged).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Widget");
    }

    #[rocket::async_test]
    async fn updates_only_present_fields() {
        let store = MemoryStore::new();
        let created = store.create(record("Widget", ",x,", true)).await.unwrap();

        let update = UpdateRecord {
            is_active: Some(false),
            ..UpdateRecord::default()
        };
        let updated = store.update(created.id, update).await.unwrap();

        assert_eq!(updated.name, "Widget");
        assert_eq!(updated.tags_csv, ",x,");
        assert!(!updated.is_active);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[rocket::async_test]
    async fn update_of_missing_row_fails() {
        let store = MemoryStore::new();
        let result = store.update(9, UpdateRecord::default()).await;
        assert!(result.is_err());
    }

    #[rocket::async_test]
    async fn delete_removes_row() {
        let store = MemoryStore::new();
        let created = store.create(record("Widget", "", true)).await.unwrap();
        store.delete(created.id).await.unwrap();
        assert!(store.find_unique(created.id).await.unwrap().is_none());
    }
}
