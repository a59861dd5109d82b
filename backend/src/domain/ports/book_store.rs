//! Persistence port for book records.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Book, BookId, NewBook, UserId};

/// Errors raised by book store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookStoreError {
    /// Store connection could not be established.
    #[error("book store connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("book store query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl BookStoreError {
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
}

/// Driven port over the relational book table.
///
/// `create` is a single atomic write: the store assigns the internal id and
/// the derived public identifier together, so no record is ever visible with
/// a placeholder code.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Fetch every book record.
    async fn find_all(&self) -> Result<Vec<Book>, BookStoreError>;

    /// Fetch a book by internal id.
    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookStoreError>;

    /// Fetch the books owned by a user, by indexed owner id.
    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Book>, BookStoreError>;

    /// Insert a new book, returning the record with its assigned id and
    /// derived public identifier.
    async fn create(&self, book: &NewBook) -> Result<Book, BookStoreError>;

    /// Replace an existing record, matched by internal id.
    async fn update(&self, book: &Book) -> Result<(), BookStoreError>;

    /// Delete the record with the given internal id.
    async fn delete(&self, id: BookId) -> Result<(), BookStoreError>;

    /// Delete every book owned by a user, returning how many went away.
    async fn delete_all_for_owner(&self, owner: UserId) -> Result<usize, BookStoreError>;
}

/// Fixture store for tests that do not exercise book persistence: reads see
/// an empty table, writes succeed without effect.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookStore;

#[async_trait]
impl BookStore for FixtureBookStore {
    async fn find_all(&self) -> Result<Vec<Book>, BookStoreError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: BookId) -> Result<Option<Book>, BookStoreError> {
        Ok(None)
    }

    async fn find_by_owner(&self, _owner: UserId) -> Result<Vec<Book>, BookStoreError> {
        Ok(Vec::new())
    }

    async fn create(&self, book: &NewBook) -> Result<Book, BookStoreError> {
        Ok(Book::new(BookId::new(0), book.details.clone(), book.owner))
    }

    async fn update(&self, _book: &Book) -> Result<(), BookStoreError> {
        Ok(())
    }

    async fn delete(&self, _id: BookId) -> Result<(), BookStoreError> {
        Ok(())
    }

    async fn delete_all_for_owner(&self, _owner: UserId) -> Result<usize, BookStoreError> {
        Ok(0)
    }
}
