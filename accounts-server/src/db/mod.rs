//! Database layer - schema and account stores
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections by default) - no Arc<Mutex<Connection>>
//! - One statement per operation; row-level atomicity comes from Postgres
//! - Missing rows are `Ok(None)` on reads, `DbError::NotFound` on update

pub mod repos;
pub mod schema;

pub use repos::*;
