//! A REST service for managing tagged resources, plus the triangular-sum
//! functions in [`sums`].

pub mod config;
pub mod database;
pub mod models;
pub mod routes;
pub mod server;
pub mod sums;
pub mod utils;
