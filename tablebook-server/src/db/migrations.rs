//! Schema creation for tables and reservations

use sqlx::PgPool;

/// Create both tables and the booking index if they do not exist yet.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running tablebook migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS restaurant_tables (
            id SERIAL PRIMARY KEY,
            name TEXT,
            seats INTEGER NOT NULL CHECK (seats > 0),
            location TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reservations (
            id SERIAL PRIMARY KEY,
            customer_name TEXT NOT NULL,
            table_id INTEGER NOT NULL REFERENCES restaurant_tables(id) ON DELETE RESTRICT,
            reservation_time TIMESTAMP NOT NULL,
            duration_minutes INTEGER NOT NULL CHECK (duration_minutes > 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS reservations_table_time_idx
            ON reservations (table_id, reservation_time)
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Migrations complete");
    Ok(())
}
