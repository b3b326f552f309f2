//! PostgreSQL persistence for the court booking service.
//!
//! Repositories are plain async functions over a [`DbPool`]; row types live
//! in [`models`] and convert into the domain types of `courtside-core`.

pub mod models;
pub mod repositories;
pub mod schema;

use std::time::Duration;

use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub type DbPool = Pool<Postgres>;

const MAX_CONNECTIONS: u32 = 5;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Connects to PostgreSQL and verifies the connection.
pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await?;

    tracing::debug!("Database pool ready ({} connections max)", MAX_CONNECTIONS);
    Ok(pool)
}
