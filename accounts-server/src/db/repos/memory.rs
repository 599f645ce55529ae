//! In-process account store
//!
//! Same contract as `PgAccountStore`. Ids start at 1 and are never reused,
//! like a BIGSERIAL column.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{AccountStore, DbError};
use crate::models::{Account, NewAccount};

#[derive(Default)]
struct Rows {
    last_id: i64,
    accounts: BTreeMap<i64, Account>,
}

/// Account store held in memory; contents are lost on shutdown.
#[derive(Default)]
pub struct MemoryAccountStore {
    rows: Mutex<Rows>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn all(&self) -> Result<Vec<Account>, DbError> {
        let rows = self.rows.lock().await;
        Ok(rows.accounts.values().cloned().collect())
    }

    async fn find(&self, id: i64) -> Result<Option<Account>, DbError> {
        let rows = self.rows.lock().await;
        Ok(rows.accounts.get(&id).cloned())
    }

    async fn save(&self, account: NewAccount) -> Result<Account, DbError> {
        let mut rows = self.rows.lock().await;
        rows.last_id += 1;
        let account = account.with_id(rows.last_id);
        rows.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DbError> {
        let mut rows = self.rows.lock().await;
        match rows.accounts.get_mut(&account.id) {
            Some(slot) => {
                *slot = account.clone();
                Ok(account)
            }
            None => Err(DbError::account_not_found(account.id)),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        self.rows.lock().await.accounts.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, balance: i64) -> NewAccount {
        NewAccount {
            name: name.to_owned(),
            balance,
            email: None,
            address: None,
            phone_number: None,
        }
    }

    #[tokio::test]
    async fn ids_increase_and_are_not_reused() {
        let store = MemoryAccountStore::new();
        let a = store.save(draft("a", 1)).await.unwrap();
        let b = store.save(draft("b", 2)).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        store.delete(b.id).await.unwrap();
        let c = store.save(draft("c", 3)).await.unwrap();
        assert_eq!(c.id, 3);
    }

    #[tokio::test]
    async fn all_is_ordered_by_id() {
        let store = MemoryAccountStore::new();
        for name in ["x", "y", "z"] {
            store.save(draft(name, 0)).await.unwrap();
        }
        let ids: Vec<i64> = store.all().await.unwrap().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn update_missing_does_not_insert() {
        let store = MemoryAccountStore::new();
        let err = store.update(draft("ghost", 0).with_id(7)).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "Account", .. }));
        assert!(store.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_replaces_fields() {
        let store = MemoryAccountStore::new();
        let saved = store.save(draft("old", 1)).await.unwrap();

        let mut changed = draft("new", 2);
        changed.email = Some("new@example.com".into());
        store.update(changed.clone().with_id(saved.id)).await.unwrap();

        assert_eq!(store.find(saved.id).await.unwrap(), Some(changed.with_id(saved.id)));
    }

    #[tokio::test]
    async fn delete_missing_is_ok() {
        let store = MemoryAccountStore::new();
        assert!(store.delete(12).await.is_ok());
    }
}
