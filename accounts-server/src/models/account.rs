//! Account record and request payload
//!
//! Required: `name`, `balance`. Optional: `email`, `address`, `phone_number`.
//! Optional fields are left out of the JSON output when unset.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Column limits, mirrored by the `accounts` table definition
const MAX_NAME_LEN: usize = 64;
const MAX_EMAIL_LEN: usize = 64;
const MAX_ADDRESS_LEN: usize = 256;
const MAX_PHONE_LEN: usize = 32;

/// One `@`, no whitespace, a dot somewhere in the domain
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("invalid email regex"));

/// Stored account, as returned by every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub balance: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Request body for POST and PUT.
///
/// Any `id` in the body is ignored; ids come from storage (POST) or the
/// path (PUT).
#[derive(Debug, Clone, Deserialize)]
pub struct AccountPayload {
    pub name: String,
    pub balance: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Validated account fields without an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub balance: i64,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

impl AccountPayload {
    /// Check field constraints and produce a `NewAccount`.
    ///
    /// # Example
    /// ```
    /// use accounts_server::models::AccountPayload;
    ///
    /// let payload: AccountPayload =
    ///     serde_json::from_str(r#"{"name": "Alice", "balance": 100}"#).unwrap();
    /// assert!(payload.validate().is_ok());
    /// ```
    pub fn validate(self) -> Result<NewAccount, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }
        check_len("name", &self.name, MAX_NAME_LEN)?;

        if let Some(email) = &self.email {
            check_len("email", email, MAX_EMAIL_LEN)?;
            if !EMAIL_RE.is_match(email) {
                return Err(ValidationError::InvalidFormat {
                    field: "email",
                    reason: "must be an address of the form user@domain",
                });
            }
        }
        if let Some(address) = &self.address {
            check_len("address", address, MAX_ADDRESS_LEN)?;
        }
        if let Some(phone) = &self.phone_number {
            check_len("phone_number", phone, MAX_PHONE_LEN)?;
        }

        Ok(NewAccount {
            name: self.name,
            balance: self.balance,
            email: self.email,
            address: self.address,
            phone_number: self.phone_number,
        })
    }
}

impl NewAccount {
    /// Attach an identity, replacing every mutable field of the stored row.
    pub fn with_id(self, id: i64) -> Account {
        Account {
            id,
            name: self.name,
            balance: self.balance,
            email: self.email,
            address: self.address,
            phone_number: self.phone_number,
        }
    }
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}
