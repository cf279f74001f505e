use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::{Error, Row, postgres::PgRow};
use time::OffsetDateTime;

use crate::{
    database::{traits::DatabaseResource, values::DatabaseValue},
    utils::{
        tags::{decode_tags, encode_tags},
        time::serialize_offset_date_time,
    },
};

/// A resource as stored, with tags in their encoded `tags_csv` form.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub tags_csv: String,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
}

impl DatabaseResource for Resource {
    fn from_row(row: &PgRow) -> Result<Self, Error> {
        Ok(Resource {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            tags_csv: row.try_get("tags_csv")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn is_creatable() -> bool {
        true
    }
}

/// Every column a new resource is inserted with.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRecord {
    pub name: String,
    pub description: String,
    pub tags_csv: String,
    pub is_active: bool,
}

impl CreateRecord {
    pub fn params(&self) -> Vec<(&'static str, DatabaseValue)> {
        vec![
            ("name", self.name.clone().into()),
            ("description", self.description.clone().into()),
            ("tags_csv", self.tags_csv.clone().into()),
            ("is_active", self.is_active.into()),
        ]
    }
}

/// The columns a partial update replaces. `None` leaves a column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateRecord {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags_csv: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateRecord {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.tags_csv.is_none()
            && self.is_active.is_none()
    }

    pub fn params(&self) -> Vec<(&'static str, DatabaseValue)> {
        let mut params: Vec<(&'static str, DatabaseValue)> = Vec::new();
        if let Some(name) = &self.name {
            params.push(("name", name.into()));
        }
        if let Some(description) = &self.description {
            params.push(("description", description.into()));
        }
        if let Some(tags_csv) = &self.tags_csv {
            params.push(("tags_csv", tags_csv.into()));
        }
        if let Some(is_active) = self.is_active {
            params.push(("is_active", is_active.into()));
        }
        params
    }

    pub fn apply(self, resource: &mut Resource) {
        if let Some(name) = self.name {
            resource.name = name;
        }
        if let Some(description) = self.description {
            resource.description = description;
        }
        if let Some(tags_csv) = self.tags_csv {
            resource.tags_csv = tags_csv;
        }
        if let Some(is_active) = self.is_active {
            resource.is_active = is_active;
        }
    }
}

/// A request body reduced to the fields the service understands.
///
/// Fields of the wrong JSON type are treated as absent, except `name`, which
/// remembers that it was supplied: `None` means the key was missing,
/// `Some(None)` means it was present but not a string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourcePayload {
    pub name: Option<Option<String>>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

impl ResourcePayload {
    pub fn from_json(body: &Value) -> Self {
        let empty = Map::new();
        let fields = body.as_object().unwrap_or(&empty);

        Self {
            name: fields
                .get("name")
                .map(|name| name.as_str().map(str::to_string)),
            description: fields
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
            tags: fields.get("tags").and_then(Value::as_array).map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            }),
            is_active: fields.get("isActive").and_then(Value::as_bool),
        }
    }

    pub fn name_supplied(&self) -> bool {
        self.name.is_some()
    }

    /// The name, if it was supplied as a string.
    pub fn name(&self) -> Option<&str> {
        self.name.as_ref()?.as_deref()
    }
}

/// The trimmed name, or `None` if it is missing, not a string, or blank.
pub fn ensure_name(name: Option<&str>) -> Option<String> {
    let normalized = name?.trim();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized.to_string())
    }
}

/// Builds the full insert record, applying defaults for missing fields.
pub fn to_create_record(payload: &ResourcePayload) -> CreateRecord {
    let tags = payload.tags.clone().unwrap_or_default();

    CreateRecord {
        name: payload.name().unwrap_or_default().trim().to_string(),
        description: payload.description.clone().unwrap_or_default(),
        tags_csv: encode_tags(&tags[..]),
        is_active: payload.is_active.unwrap_or(true),
    }
}

/// Builds a partial update from the valid fields only. No defaults are
/// applied; an empty result means there is nothing to update.
pub fn to_update_record(payload: &ResourcePayload) -> UpdateRecord {
    UpdateRecord {
        name: ensure_name(payload.name()),
        description: payload.description.clone(),
        tags_csv: payload.tags.as_ref().map(|tags| encode_tags(&tags[..])),
        is_active: payload.is_active,
    }
}

/// The external shape of a resource.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub is_active: bool,

    #[serde(serialize_with = "serialize_offset_date_time")]
    pub created_at: OffsetDateTime,
}

impl From<Resource> for ResourceResponse {
    fn from(resource: Resource) -> Self {
        Self {
            tags: decode_tags(&resource.tags_csv),
            id: resource.id,
            name: resource.name,
            description: resource.description,
            is_active: resource.is_active,
            created_at: resource.created_at,
        }
    }
}
