//! In-memory Persistence Port adapter.
//!
//! Backs the integration suite and local development wiring. Each mutation
//! runs under one write lock, so id assignment, the unique-name constraint,
//! and public-identifier derivation are atomic with the insert, matching the
//! guarantees a relational adapter provides with a transaction.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{BookStore, BookStoreError, UserStore, UserStoreError};
use crate::domain::{Book, BookId, NewBook, User, UserDraft, UserId, UserName};

#[derive(Debug, Default)]
struct UserTable {
    rows: BTreeMap<i64, User>,
    ids_by_name: HashMap<String, i64>,
    next_id: i64,
}

impl UserTable {
    fn assign_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// User store backed by process memory.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    table: RwLock<UserTable>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user at an explicit id, bumping the id sequence past it.
    ///
    /// Intended for tests and fixtures that need stable identifiers.
    pub async fn insert_with_id(&self, id: UserId, draft: UserDraft) {
        let mut table = self.table.write().await;
        let user = User::new(id, draft);
        table
            .ids_by_name
            .insert(user.name().as_str().to_owned(), id.as_i64());
        table.rows.insert(id.as_i64(), user);
        table.next_id = table.next_id.max(id.as_i64());
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_all(&self) -> Result<Vec<User>, UserStoreError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id.as_i64()).cloned())
    }

    async fn find_by_name(&self, name: &UserName) -> Result<Option<User>, UserStoreError> {
        let table = self.table.read().await;
        Ok(table
            .ids_by_name
            .get(name.as_str())
            .and_then(|id| table.rows.get(id))
            .cloned())
    }

    async fn create(&self, draft: &UserDraft) -> Result<User, UserStoreError> {
        let mut table = self.table.write().await;
        if table.ids_by_name.contains_key(draft.name.as_str()) {
            return Err(UserStoreError::duplicate_name(draft.name.as_str()));
        }
        let id = table.assign_id();
        let user = User::new(UserId::new(id), draft.clone());
        table
            .ids_by_name
            .insert(user.name().as_str().to_owned(), id);
        table.rows.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<(), UserStoreError> {
        let mut table = self.table.write().await;
        let Some(existing) = table.rows.get(&user.id().as_i64()).cloned() else {
            return Err(UserStoreError::query(format!(
                "user {} does not exist",
                user.id()
            )));
        };
        if existing.name() != user.name() {
            if table.ids_by_name.contains_key(user.name().as_str()) {
                return Err(UserStoreError::duplicate_name(user.name().as_str()));
            }
            table.ids_by_name.remove(existing.name().as_str());
            table
                .ids_by_name
                .insert(user.name().as_str().to_owned(), user.id().as_i64());
        }
        table.rows.insert(user.id().as_i64(), user.clone());
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), UserStoreError> {
        let mut table = self.table.write().await;
        let Some(removed) = table.rows.remove(&id.as_i64()) else {
            return Err(UserStoreError::query(format!("user {id} does not exist")));
        };
        table.ids_by_name.remove(removed.name().as_str());
        Ok(())
    }
}

#[derive(Debug, Default)]
struct BookTable {
    rows: BTreeMap<i64, Book>,
    next_id: i64,
}

/// Book store backed by process memory.
#[derive(Debug, Default)]
pub struct InMemoryBookStore {
    table: RwLock<BookTable>,
}

impl InMemoryBookStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn find_all(&self) -> Result<Vec<Book>, BookStoreError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookStoreError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id.as_i64()).cloned())
    }

    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Book>, BookStoreError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|book| book.owner() == owner)
            .cloned()
            .collect())
    }

    async fn create(&self, book: &NewBook) -> Result<Book, BookStoreError> {
        let mut table = self.table.write().await;
        table.next_id += 1;
        let id = table.next_id;
        // Id assignment and public-identifier derivation happen under the
        // same lock as the insert; no placeholder code is ever visible.
        let record = Book::new(BookId::new(id), book.details.clone(), book.owner);
        table.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, book: &Book) -> Result<(), BookStoreError> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&book.id().as_i64()) {
            return Err(BookStoreError::query(format!(
                "book {} does not exist",
                book.id()
            )));
        }
        table.rows.insert(book.id().as_i64(), book.clone());
        Ok(())
    }

    async fn delete(&self, id: BookId) -> Result<(), BookStoreError> {
        let mut table = self.table.write().await;
        if table.rows.remove(&id.as_i64()).is_none() {
            return Err(BookStoreError::query(format!("book {id} does not exist")));
        }
        Ok(())
    }

    async fn delete_all_for_owner(&self, owner: UserId) -> Result<usize, BookStoreError> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|_, book| book.owner() != owner);
        Ok(before - table.rows.len())
    }
}
