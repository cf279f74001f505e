use rocket::{
    Catcher, Request, Route, catch, catchers, get, http::Status, routes, serde::json::Json,
};
use serde::Serialize;

use crate::routes::error::{ErrorBody, UNEXPECTED_ERROR};

pub mod error;
pub mod resources;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}

pub fn routes() -> Vec<Route> {
    routes![health]
}

pub fn catchers() -> Vec<Catcher> {
    catchers![internal_error, default_catcher]
}

#[get("/health")]
pub fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Fires only for failures outside a handler, such as a panic or a missing
/// managed store; handler errors are answered by `ApiError`.
#[catch(500)]
fn internal_error(_request: &Request) -> Json<ErrorBody> {
    ErrorBody::new(UNEXPECTED_ERROR)
}

/// Any other status raised outside a handler, answered with its reason.
#[catch(default)]
fn default_catcher(status: Status, _request: &Request) -> (Status, Json<ErrorBody>) {
    (status, ErrorBody::new(status.reason().unwrap_or(UNEXPECTED_ERROR)))
}
