//! Persistence port for user records.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{User, UserDraft, UserId, UserName};

/// Errors raised by user store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserStoreError {
    /// Store connection could not be established.
    #[error("user store connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user store query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// The unique-name constraint rejected a create.
    #[error("user name {name} already exists")]
    DuplicateName {
        /// Name that collided.
        name: String,
    },
}

impl UserStoreError {
    /// Helper for connection-oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for unique-name violations.
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }
}

/// Driven port over the relational user table.
///
/// Lookups are indexed (by id, by name) rather than full scans; `create` is
/// one atomic write that assigns the id and enforces name uniqueness, so a
/// pre-check plus insert race cannot produce duplicates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch every user record.
    async fn find_all(&self) -> Result<Vec<User>, UserStoreError>;

    /// Fetch a user by internal id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError>;

    /// Fetch a user by exact, case-sensitive name.
    async fn find_by_name(&self, name: &UserName) -> Result<Option<User>, UserStoreError>;

    /// Insert a new user, returning the record with its store-assigned id.
    ///
    /// Fails with [`UserStoreError::DuplicateName`] when the name is taken.
    async fn create(&self, draft: &UserDraft) -> Result<User, UserStoreError>;

    /// Replace an existing record, matched by internal id.
    async fn update(&self, user: &User) -> Result<(), UserStoreError>;

    /// Delete the record with the given internal id.
    async fn delete(&self, id: UserId) -> Result<(), UserStoreError>;
}

/// Fixture store for tests that do not exercise user persistence: reads see
/// an empty table, writes succeed without effect.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserStore;

#[async_trait]
impl UserStore for FixtureUserStore {
    async fn find_all(&self) -> Result<Vec<User>, UserStoreError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: UserId) -> Result<Option<User>, UserStoreError> {
        Ok(None)
    }

    async fn find_by_name(&self, _name: &UserName) -> Result<Option<User>, UserStoreError> {
        Ok(None)
    }

    async fn create(&self, draft: &UserDraft) -> Result<User, UserStoreError> {
        Ok(User::new(UserId::new(0), draft.clone()))
    }

    async fn update(&self, _user: &User) -> Result<(), UserStoreError> {
        Ok(())
    }

    async fn delete(&self, _id: UserId) -> Result<(), UserStoreError> {
        Ok(())
    }
}
