use resource_service::{config, server};

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let figment = config::figment();
    let app_config: config::AppConfig = figment.extract()?;

    server::rocket(figment, app_config)?.launch().await?;
    Ok(())
}
