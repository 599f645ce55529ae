//! accounts-server: HTTP server for the Account resource
//!
//! Exposes list/read/create/update/delete over a single `accounts` table.

pub mod db;
pub mod http;
pub mod models;

pub use db::{AccountStore, DbError, MemoryAccountStore, PgAccountStore};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig};
pub use models::{Account, AccountPayload, NewAccount, ValidationError};
