//! Domain models with validation at construction
//!
//! Request bodies deserialize into `AccountPayload` and are validated into
//! `NewAccount` before anything touches storage.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod account;

pub use validation::ValidationError;
pub use account::{Account, AccountPayload, NewAccount};
