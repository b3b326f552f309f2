use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL,
            password_hash VARCHAR(255) NOT NULL,
            role VARCHAR(16) NOT NULL DEFAULT 'user',
            status VARCHAR(16) NOT NULL DEFAULT 'pending',
            manzana VARCHAR(64) NOT NULL,
            villa VARCHAR(64) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create sessions table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            token VARCHAR(128) PRIMARY KEY,
            user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            expires_at TIMESTAMP WITH TIME ZONE NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create reservations table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reservations (
            id UUID PRIMARY KEY,
            user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            court VARCHAR(32) NOT NULL,
            reservation_date DATE NOT NULL,
            start_minute INTEGER NOT NULL,
            end_minute INTEGER NOT NULL,
            status VARCHAR(16) NOT NULL,
            created_by_admin BOOLEAN NOT NULL DEFAULT FALSE,
            proof_file_name VARCHAR(255) NULL,
            proof_content_type VARCHAR(128) NULL,
            proof_data BYTEA NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_minute_range CHECK (
                start_minute >= 0 AND end_minute <= 1440 AND end_minute > start_minute
            )
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create cancellations table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cancellations (
            id UUID PRIMARY KEY,
            reservation_id UUID NOT NULL REFERENCES reservations(id) ON DELETE CASCADE,
            user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            user_name VARCHAR(255) NOT NULL,
            court VARCHAR(32) NOT NULL,
            reservation_date DATE NOT NULL,
            slot_label VARCHAR(32) NOT NULL,
            justification TEXT NOT NULL,
            cancelled_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create instructor_bookings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS instructor_bookings (
            id UUID PRIMARY KEY,
            instructor_name VARCHAR(255) NOT NULL,
            court VARCHAR(32) NOT NULL,
            booking_date DATE NOT NULL,
            start_minute INTEGER NOT NULL,
            end_minute INTEGER NOT NULL,
            created_by UUID NOT NULL REFERENCES users(id),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_instructor_range CHECK (
                start_minute >= 0 AND end_minute <= 1440 AND end_minute > start_minute
            )
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create notifications table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS notifications (
            id UUID PRIMARY KEY,
            user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            title VARCHAR(255) NOT NULL,
            message TEXT NOT NULL,
            kind VARCHAR(16) NOT NULL,
            is_read BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create system_changes table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS system_changes (
            id UUID PRIMARY KEY,
            user_id UUID NOT NULL,
            user_name VARCHAR(255) NOT NULL,
            action VARCHAR(255) NOT NULL,
            details TEXT NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create settings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            name VARCHAR(64) PRIMARY KEY,
            document JSONB NOT NULL,
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    let indexes = [
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users(LOWER(email))",
        "CREATE INDEX IF NOT EXISTS idx_users_household ON users(LOWER(manzana), LOWER(villa))",
        "CREATE INDEX IF NOT EXISTS idx_sessions_user_id ON sessions(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_reservations_date ON reservations(reservation_date)",
        "CREATE INDEX IF NOT EXISTS idx_reservations_user_id ON reservations(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_instructor_bookings_date ON instructor_bookings(booking_date)",
        "CREATE INDEX IF NOT EXISTS idx_notifications_user_id ON notifications(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_system_changes_created_at ON system_changes(created_at)",
    ];
    for statement in indexes {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
