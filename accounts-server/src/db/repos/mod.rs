//! Account store implementations
//!
//! - `PgAccountStore`: the `accounts` table via sqlx
//! - `MemoryAccountStore`: process-local, for tests and `--in-memory` runs

pub mod accounts;
pub mod memory;

pub use accounts::{AccountStore, DbError, PgAccountStore, DEFAULT_MAX_CONNECTIONS};
pub use memory::MemoryAccountStore;
