//! Account repository
//!
//! `AccountStore` is the seam handlers talk to. `PgAccountStore` issues one
//! statement per call:
//! - update: `UPDATE ... RETURNING`, NotFound when no row matched
//! - delete: plain `DELETE`, idempotent

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::db::schema;
use crate::models::{Account, NewAccount};

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub(crate) fn account_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "Account",
            id: id.to_string(),
        }
    }
}

/// Persistence operations for accounts (testable)
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// All accounts ordered by id.
    async fn all(&self) -> Result<Vec<Account>, DbError>;

    /// A single account, or `None` if no row has this id.
    async fn find(&self, id: i64) -> Result<Option<Account>, DbError>;

    /// Insert a new account; storage assigns the id.
    async fn save(&self, account: NewAccount) -> Result<Account, DbError>;

    /// Overwrite every mutable field of an existing account.
    ///
    /// Fails with `DbError::NotFound` if the id is absent.
    async fn update(&self, account: Account) -> Result<Account, DbError>;

    /// Remove an account by id (idempotent).
    async fn delete(&self, id: i64) -> Result<(), DbError>;
}

/// Account repository backed by Postgres
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a bounded pool and make sure the `accounts` table exists.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = PgAccountStore::connect(&database_uri, DEFAULT_MAX_CONNECTIONS).await?;
    /// ```
    pub async fn connect(database_uri: &str, max_connections: u32) -> Result<Self, DbError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_uri)
            .await?;
        schema::ensure(&pool).await?;

        tracing::info!(max_connections, "Connected to accounts database");
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn all(&self) -> Result<Vec<Account>, DbError> {
        let accounts: Vec<Account> = sqlx::query_as(
            r#"
            SELECT id, name, balance, email, address, phone_number
            FROM accounts
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    async fn find(&self, id: i64) -> Result<Option<Account>, DbError> {
        let account: Option<Account> = sqlx::query_as(
            r#"
            SELECT id, name, balance, email, address, phone_number
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn save(&self, account: NewAccount) -> Result<Account, DbError> {
        let account: Account = sqlx::query_as(
            r#"
            INSERT INTO accounts (name, balance, email, address, phone_number)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, balance, email, address, phone_number
            "#,
        )
        .bind(&account.name)
        .bind(account.balance)
        .bind(&account.email)
        .bind(&account.address)
        .bind(&account.phone_number)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = account.id, "Inserted account");
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DbError> {
        let updated: Option<Account> = sqlx::query_as(
            r#"
            UPDATE accounts
            SET name = $2,
                balance = $3,
                email = $4,
                address = $5,
                phone_number = $6
            WHERE id = $1
            RETURNING id, name, balance, email, address, phone_number
            "#,
        )
        .bind(account.id)
        .bind(&account.name)
        .bind(account.balance)
        .bind(&account.email)
        .bind(&account.address)
        .bind(&account.phone_number)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| DbError::account_not_found(account.id))
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        tracing::debug!(id, rows = result.rows_affected(), "Deleted account");
        Ok(())
    }
}
