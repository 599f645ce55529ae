//! Table definition for accounts
//!
//! Column widths match the limits enforced in `models::account`.

use sqlx::PgPool;

const CREATE_ACCOUNTS: &str = r#"
    CREATE TABLE IF NOT EXISTS accounts (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(64) NOT NULL,
        balance BIGINT NOT NULL,
        email VARCHAR(64),
        address VARCHAR(256),
        phone_number VARCHAR(32)
    )
"#;

/// Create the `accounts` table if it does not exist.
pub async fn ensure(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring accounts table exists");
    sqlx::query(CREATE_ACCOUNTS).execute(pool).await?;
    Ok(())
}

/// Drop and recreate the `accounts` table. Destroys all rows.
pub async fn reset(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::warn!("Dropping accounts table");
    sqlx::query("DROP TABLE IF EXISTS accounts")
        .execute(pool)
        .await?;
    ensure(pool).await
}
