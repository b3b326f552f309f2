use chrono::Utc;
use courtside_core::models::settings::Settings;
use eyre::Result;
use sqlx::types::Json;
use sqlx::{Pool, Postgres};

const SETTINGS_KEY: &str = "facility";

/// Stored settings, or the defaults when none were saved yet.
pub async fn load_settings(pool: &Pool<Postgres>) -> Result<Settings> {
    let row: Option<Json<Settings>> =
        sqlx::query_scalar("SELECT document FROM settings WHERE name = $1")
            .bind(SETTINGS_KEY)
            .fetch_optional(pool)
            .await?;

    Ok(row.map(|Json(settings)| settings).unwrap_or_default())
}

pub async fn save_settings(pool: &Pool<Postgres>, settings: &Settings) -> Result<()> {
    tracing::debug!("Saving facility settings");

    sqlx::query(
        r#"
        INSERT INTO settings (name, document, updated_at)
        VALUES ($1, $2, $3)
        ON CONFLICT (name) DO UPDATE SET document = EXCLUDED.document, updated_at = EXCLUDED.updated_at
        "#,
    )
    .bind(SETTINGS_KEY)
    .bind(Json(settings))
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(())
}
