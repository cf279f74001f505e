//! Runtime configuration.
//!
//! Values are layered, later sources winning:
//!
//! 1. Rocket's defaults, with the port defaulting to `4000`
//! 2. `Rocket.toml` (or the file named by `ROCKET_CONFIG`)
//! 3. `ROCKET_*` environment variables
//! 4. The plain `PORT`, `DATABASE_URL` and `API_PREFIX` environment variables
//!
//! A `.env` file in the working directory is loaded into the environment
//! first.

use rocket::figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_API_PREFIX: &str = "/api";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// PostgreSQL connection string. Without one, resources are kept in
    /// memory for the lifetime of the process.
    pub database_url: Option<String>,
    /// Path the resource routes are mounted under.
    pub api_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            api_prefix: DEFAULT_API_PREFIX.to_string(),
        }
    }
}

impl AppConfig {
    /// Mount point for the resource routes, e.g. `/api/resources`.
    pub fn resources_base(&self) -> String {
        let prefix = self.api_prefix.trim().trim_end_matches('/');
        if prefix.is_empty() {
            "/resources".to_string()
        } else if prefix.starts_with('/') {
            format!("{}/resources", prefix)
        } else {
            format!("/{}/resources", prefix)
        }
    }
}

pub fn figment() -> Figment {
    Figment::from(rocket::Config::default())
        .merge(("port", DEFAULT_PORT))
        .merge(Toml::file(Env::var_or("ROCKET_CONFIG", "Rocket.toml")).nested())
        .merge(Env::prefixed("ROCKET_").ignore(&["PROFILE"]).global())
        .merge(Env::raw().only(&["port", "database_url", "api_prefix"]))
}
