//! Local mirror of membership directory users.
//!
//! The mirror exists so rendering and session checks never block on the
//! directory being up. [`UserStore`] is the seam; [`MemoryStore`] is the
//! bundled implementation and the test double.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::directory::{is_admin, DirectoryUser};
use crate::error::Error;

/// The mutable fields of a mirrored user, applied in one upsert.
///
/// `is_admin` travels inside the same payload as the profile fields, so a
/// role change can never be observed half-applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFields {
    pub email: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
}

impl UserFields {
    /// Project a directory record into mirror fields.
    pub fn from_directory(user: &DirectoryUser) -> Self {
        Self {
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_admin: is_admin(user),
        }
    }
}

/// A mirrored user as the store holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    /// Identifier in the membership directory, used as the mirror key.
    pub external_id: String,
    #[serde(flatten)]
    pub fields: UserFields,
    /// When this record last reflected the directory.
    pub synced_at: DateTime<Utc>,
}

/// Write and read operations on the user mirror.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create or replace the mirrored record for `external_id` in a single
    /// atomic step.
    async fn upsert(
        &self,
        external_id: &str,
        fields: UserFields,
        now: DateTime<Utc>,
    ) -> Result<StoredUser, Error>;

    async fn get(&self, external_id: &str) -> Result<Option<StoredUser>, Error>;

    async fn count(&self) -> Result<usize, Error>;
}

/// In-memory mirror behind an `RwLock`.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, StoredUser>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn upsert(
        &self,
        external_id: &str,
        fields: UserFields,
        now: DateTime<Utc>,
    ) -> Result<StoredUser, Error> {
        let record = StoredUser {
            external_id: external_id.to_string(),
            fields,
            synced_at: now,
        };
        self.users
            .write()
            .insert(external_id.to_string(), record.clone());
        Ok(record)
    }

    async fn get(&self, external_id: &str) -> Result<Option<StoredUser>, Error> {
        Ok(self.users.read().get(external_id).cloned())
    }

    async fn count(&self) -> Result<usize, Error> {
        Ok(self.users.read().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fields(email: &str, admin: bool) -> UserFields {
        UserFields {
            email: email.to_string(),
            display_name: "Ana Lee".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Lee".to_string(),
            is_admin: admin,
        }
    }

    fn frozen() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 5, 9, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_upsert_then_get() {
        let store = MemoryStore::new();
        store
            .upsert("42", fields("ana@example.com", false), frozen())
            .await
            .unwrap();

        let stored = store.get("42").await.unwrap().unwrap();
        assert_eq!(stored.fields.email, "ana@example.com");
        assert_eq!(stored.synced_at, frozen());
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_upsert_replaces_whole_record() {
        let store = MemoryStore::new();
        store
            .upsert("42", fields("old@example.com", false), frozen())
            .await
            .unwrap();
        store
            .upsert("42", fields("new@example.com", true), frozen())
            .await
            .unwrap();

        let stored = store.get("42").await.unwrap().unwrap();
        assert_eq!(stored.fields.email, "new@example.com");
        assert!(stored.fields.is_admin);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = MemoryStore::new();
        assert!(store.get("nope").await.unwrap().is_none());
    }

    #[test]
    fn test_fields_from_directory_carries_admin_flag() {
        let user = DirectoryUser {
            id: 7,
            email: "a@b.com".to_string(),
            login: "a".to_string(),
            display_name: "A".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            roles: vec!["administrator".to_string()],
        };
        assert!(UserFields::from_directory(&user).is_admin);
    }
}
