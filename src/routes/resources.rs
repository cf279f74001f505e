//! CRUD endpoints for resources, mounted at `<api_prefix>/resources`.
//!
//! Each handler validates its input first and answers 400/404 without
//! touching the store when validation fails. Store failures propagate with
//! `?` and are answered by `ApiError`.

use rocket::{
    Route, State, delete, get,
    http::Status,
    post, put, routes,
    serde::json::{self, Json},
};
use serde_json::Value;

use crate::{
    database::store::ResourceStore,
    models::resource::{
        CreateRecord, ResourcePayload, ResourceResponse, UpdateRecord, ensure_name,
        to_create_record, to_update_record,
    },
    routes::error::{
        ApiError, INVALID_RESOURCE_ID, NO_VALID_FIELDS, RESOURCE_NAME_REQUIRED,
    },
    utils::filters::{ResourceListQuery, build_resource_filters},
};

/// Largest integer an `f64` represents exactly.
const MAX_EXACT_FLOAT_INTEGER: f64 = 9_007_199_254_740_991.0;

pub fn routes() -> Vec<Route> {
    routes![
        create_resource,
        list_resources,
        get_resource,
        put_resource,
        delete_resource
    ]
}

/// Parses a path id as a positive integer.
///
/// Accepts decimal integers and integral decimals such as `7.0`, with
/// surrounding whitespace ignored.
pub fn parse_id(id_param: &str) -> Result<i64, ApiError> {
    let trimmed = id_param.trim();
    let parsed = match trimmed.parse::<i64>() {
        Ok(id) => Some(id),
        Err(_) => trimmed
            .parse::<f64>()
            .ok()
            .filter(|value| {
                value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_FLOAT_INTEGER
            })
            .map(|value| value as i64),
    };
    match parsed {
        Some(id) if id > 0 => Ok(id),
        _ => Err(ApiError::BadRequest(INVALID_RESOURCE_ID)),
    }
}

/// Reads the JSON body. A missing body is an empty payload; a body that
/// cannot be read or parsed is an unexpected error carrying the parser's
/// message.
fn read_payload(body: Result<Json<Value>, json::Error<'_>>) -> Result<ResourcePayload, ApiError> {
    match body {
        Ok(body) => Ok(ResourcePayload::from_json(&body.into_inner())),
        Err(json::Error::Parse(raw, _)) if raw.trim().is_empty() => Ok(ResourcePayload::default()),
        Err(json::Error::Parse(_, e)) => Err(anyhow::Error::new(e).into()),
        Err(json::Error::Io(e)) => Err(anyhow::Error::new(e).into()),
    }
}

pub fn validate_create(payload: &ResourcePayload) -> Result<CreateRecord, ApiError> {
    if ensure_name(payload.name()).is_none() {
        return Err(ApiError::BadRequest(RESOURCE_NAME_REQUIRED));
    }
    Ok(to_create_record(payload))
}

/// A supplied but blank (or non-string) name is rejected even though the
/// update builder would simply drop it; an omitted name is fine.
pub fn validate_update(payload: &ResourcePayload) -> Result<UpdateRecord, ApiError> {
    if payload.name_supplied() && ensure_name(payload.name()).is_none() {
        return Err(ApiError::BadRequest(RESOURCE_NAME_REQUIRED));
    }
    let record = to_update_record(payload);
    if record.is_empty() {
        return Err(ApiError::BadRequest(NO_VALID_FIELDS));
    }
    Ok(record)
}

#[post("/", data = "<body>")]
pub async fn create_resource(
    store: &State<Box<dyn ResourceStore>>,
    body: Result<Json<Value>, json::Error<'_>>,
) -> Result<(Status, Json<ResourceResponse>), ApiError> {
    let payload = read_payload(body)?;
    let record = validate_create(&payload)?;
    let resource = store.create(record).await?;
    log::info!("[create_resource] Created resource {}", resource.id);
    Ok((Status::Created, Json(resource.into())))
}

#[get("/?<query..>")]
pub async fn list_resources(
    store: &State<Box<dyn ResourceStore>>,
    query: ResourceListQuery,
) -> Result<Json<Vec<ResourceResponse>>, ApiError> {
    let filters = build_resource_filters(&query);
    let resources = store.find_many(&filters).await?;
    Ok(Json(resources.into_iter().map(ResourceResponse::from).collect()))
}

#[get("/<id>")]
pub async fn get_resource(
    store: &State<Box<dyn ResourceStore>>,
    id: &str,
) -> Result<Json<ResourceResponse>, ApiError> {
    let id = parse_id(id)?;
    match store.find_unique(id).await? {
        Some(resource) => Ok(Json(resource.into())),
        None => Err(ApiError::NotFound),
    }
}

#[put("/<id>", data = "<body>")]
pub async fn put_resource(
    store: &State<Box<dyn ResourceStore>>,
    id: &str,
    body: Result<Json<Value>, json::Error<'_>>,
) -> Result<Json<ResourceResponse>, ApiError> {
    let id = parse_id(id)?;
    if store.find_unique(id).await?.is_none() {
        return Err(ApiError::NotFound);
    }
    let payload = read_payload(body)?;
    let record = validate_update(&payload)?;
    let resource = store.update(id, record).await?;
    Ok(Json(resource.into()))
}

#[delete("/<id>")]
pub async fn delete_resource(
    store: &State<Box<dyn ResourceStore>>,
    id: &str,
) -> Result<Status, ApiError> {
    let id = parse_id(id)?;
    if store.find_unique(id).await?.is_none() {
        return Err(ApiError::NotFound);
    }
    store.delete(id).await?;
    log::info!("[delete_resource] Deleted resource {}", id);
    Ok(Status::NoContent)
}
