//! Courtside server binary: loads `.env`, prepares the schema and serves the API.

use color_eyre::eyre::{Result, WrapErr};
use courtside_api::config::ApiConfig;
use courtside_db::{create_pool, schema::initialize_database};
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let config = ApiConfig::from_env().wrap_err("Invalid server configuration")?;

    let db_pool = create_pool(&config.database_url)
        .await
        .wrap_err("Could not connect to the database")?;

    // Tables are created on every start; existing data is left alone
    initialize_database(&db_pool)
        .await
        .wrap_err("Could not prepare the database schema")?;

    courtside_api::start_server(config, db_pool).await
}
