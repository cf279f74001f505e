use rocket::FromForm;

use crate::{
    database::predicate::{BoolField, Predicate, TextField},
    utils::tags::wrap_tag,
};

/// Query parameters accepted by the list endpoint.
///
/// `tag` may be repeated (`?tag=a&tag=b`); a single `tag` is a one-element
/// list.
#[derive(Debug, Clone, Default, FromForm)]
pub struct ResourceListQuery {
    pub search: Option<String>,
    pub tag: Vec<String>,
    #[field(name = "isActive")]
    pub is_active: Option<String>,
}

/// Translates list query parameters into a predicate.
///
/// Name search, the active flag and the tag group are ANDed together. A
/// resource matches the tag group if it carries any of the requested tags.
pub fn build_resource_filters(query: &ResourceListQuery) -> Predicate {
    let mut and_filters: Vec<Predicate> = Vec::new();

    let trimmed_search = query.search.as_deref().unwrap_or_default().trim();
    if !trimmed_search.is_empty() {
        and_filters.push(Predicate::Contains {
            field: TextField::Name,
            needle: trimmed_search.to_string(),
        });
    }

    if let Some(is_active) = &query.is_active {
        and_filters.push(Predicate::Equals {
            field: BoolField::IsActive,
            value: is_active == "true",
        });
    }

    let tag_filters: Vec<Predicate> = query
        .tag
        .iter()
        .filter(|tag| !tag.is_empty())
        .map(|tag| Predicate::Contains {
            field: TextField::TagsCsv,
            needle: wrap_tag(tag),
        })
        .collect();
    if !tag_filters.is_empty() {
        and_filters.push(Predicate::Or(tag_filters));
    }

    if and_filters.is_empty() {
        Predicate::MatchAll
    } else {
        Predicate::And(and_filters)
    }
}
