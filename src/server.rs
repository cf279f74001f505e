use rocket::{Build, Rocket, fairing::AdHoc, figment::Figment};
use rocket_cors::CorsOptions;

use crate::{
    config::AppConfig,
    database::{connection::connect, store::ResourceStore},
    routes,
};

/// Builds the server with an already constructed store.
pub fn build(figment: Figment, config: &AppConfig, store: Box<dyn ResourceStore>) -> Rocket<Build> {
    mount(rocket::custom(figment), config).manage(store)
}

/// Builds the server and connects the store configured in `config` when the
/// server ignites.
pub fn rocket(figment: Figment, config: AppConfig) -> anyhow::Result<Rocket<Build>> {
    let cors = CorsOptions::default()
        .to_cors()
        .map_err(|e| anyhow::anyhow!("Invalid CORS options: {}", e))?;

    let rocket = mount(rocket::custom(figment), &config)
        .attach(cors)
        .attach(AdHoc::try_on_ignite("Resource store", move |rocket| async move {
            match connect(&config).await {
                Ok(store) => Ok(rocket.manage(store)),
                Err(e) => {
                    log::error!("[rocket] Failed to open resource store: {:?}", e);
                    Err(rocket)
                }
            }
        }));
    Ok(rocket)
}

fn mount(rocket: Rocket<Build>, config: &AppConfig) -> Rocket<Build> {
    rocket
        .mount("/", routes::routes())
        .mount(config.resources_base(), routes::resources::routes())
        .register("/", routes::catchers())
}
