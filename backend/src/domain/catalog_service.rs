//! Book catalog: queries, ownership resolution, and mutations.
//!
//! Lookup misses and malformed public identifiers fold uniformly into
//! "not found" (`None`, `false`, or an empty list); store faults are logged
//! here and folded the same way. Nothing below this module ever reaches the
//! presentation layer as a fault.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::{BookStore, UserStore};
use crate::domain::{
    Book, BookListing, BookSubmission, NewBook, PublicBookId, User, UserId, UserName,
};

/// Book catalog service over the book and user stores.
pub struct CatalogService<B, U> {
    books: Arc<B>,
    users: Arc<U>,
}

impl<B, U> Clone for CatalogService<B, U> {
    fn clone(&self) -> Self {
        Self {
            books: Arc::clone(&self.books),
            users: Arc::clone(&self.users),
        }
    }
}

impl<B, U> CatalogService<B, U> {
    /// Create a new service with the given stores.
    pub fn new(books: Arc<B>, users: Arc<U>) -> Self {
        Self { books, users }
    }
}

impl<B, U> CatalogService<B, U>
where
    B: BookStore,
    U: UserStore,
{
    async fn resolve_owner(&self, name: &UserName) -> Option<User> {
        match self.users.find_by_name(name).await {
            Ok(found) => found,
            Err(err) => {
                warn!(user = %name, error = %err, "owner lookup failed");
                None
            }
        }
    }

    /// One read of the user table, keyed by id, for annotating joins.
    async fn owner_names(&self) -> Option<HashMap<UserId, UserName>> {
        match self.users.find_all().await {
            Ok(users) => Some(
                users
                    .into_iter()
                    .map(|user| (user.id(), user.name().clone()))
                    .collect(),
            ),
            Err(err) => {
                warn!(error = %err, "user table read failed");
                None
            }
        }
    }

    fn annotate(book: &Book, owners: &HashMap<UserId, UserName>) -> Option<BookListing> {
        match owners.get(&book.owner()) {
            Some(owner) => Some(BookListing::from_record(book, owner)),
            None => {
                // Orphaned rows are dropped from listings rather than shown
                // with a dangling owner.
                debug!(book = %book.public_id(), owner = %book.owner(), "dropping book with unresolvable owner");
                None
            }
        }
    }

    /// Every book in the store, annotated with its owner's name. Books whose
    /// owner cannot be resolved are dropped.
    pub async fn get_all_books(&self) -> Vec<BookListing> {
        let books = match self.books.find_all().await {
            Ok(books) => books,
            Err(err) => {
                warn!(error = %err, "book table read failed");
                return Vec::new();
            }
        };
        let Some(owners) = self.owner_names().await else {
            return Vec::new();
        };
        books
            .iter()
            .filter_map(|book| Self::annotate(book, &owners))
            .collect()
    }

    /// The books owned by the named user; empty when the name does not
    /// resolve.
    pub async fn get_books_for_user(&self, name: &UserName) -> Vec<BookListing> {
        let Some(owner) = self.resolve_owner(name).await else {
            return Vec::new();
        };
        match self.books.find_by_owner(owner.id()).await {
            Ok(books) => books
                .iter()
                .map(|book| BookListing::from_record(book, owner.name()))
                .collect(),
            Err(err) => {
                warn!(user = %name, error = %err, "owned-books read failed");
                Vec::new()
            }
        }
    }

    /// The exact complement of [`CatalogService::get_books_for_user`]: every
    /// book not owned by the named user, annotated with its true owner.
    pub async fn get_books_of_others(&self, name: &UserName) -> Vec<BookListing> {
        let Some(current) = self.resolve_owner(name).await else {
            return Vec::new();
        };
        let books = match self.books.find_all().await {
            Ok(books) => books,
            Err(err) => {
                warn!(error = %err, "book table read failed");
                return Vec::new();
            }
        };
        let Some(owners) = self.owner_names().await else {
            return Vec::new();
        };
        books
            .iter()
            .filter(|book| book.owner() != current.id())
            .filter_map(|book| Self::annotate(book, &owners))
            .collect()
    }

    /// Fetch one book by its public identifier, annotated with its true
    /// owner's name.
    ///
    /// A malformed code, a lookup miss, or an unresolvable owner all yield
    /// `None`.
    pub async fn get_book_for_id(&self, public_id: &str) -> Option<BookListing> {
        let id = PublicBookId::parse(public_id)?;
        let book = match self.books.find_by_id(id).await {
            Ok(found) => found?,
            Err(err) => {
                warn!(book = public_id, error = %err, "book lookup failed");
                return None;
            }
        };
        let owner = match self.users.find_by_id(book.owner()).await {
            Ok(found) => found?,
            Err(err) => {
                warn!(book = public_id, error = %err, "owner lookup failed");
                return None;
            }
        };
        Some(BookListing::from_record(&book, owner.name()))
    }

    /// List a new book. The store assigns the internal id and the derived
    /// public identifier in one write; false when the owner name does not
    /// resolve or the write fails.
    pub async fn add_book(&self, submission: &BookSubmission) -> bool {
        let Some(owner) = self.resolve_owner(&submission.owner).await else {
            warn!(user = %submission.owner, "cannot add book: owner not found");
            return false;
        };
        let new_book = NewBook {
            details: submission.details.clone(),
            owner: owner.id(),
        };
        match self.books.create(&new_book).await {
            Ok(book) => {
                debug!(book = %book.public_id(), owner = %submission.owner, "book created");
                true
            }
            Err(err) => {
                warn!(owner = %submission.owner, error = %err, "book create failed");
                false
            }
        }
    }

    /// Rebuild the stored record a listing refers to. `None` when the public
    /// identifier does not parse.
    fn rebuild_record(listing: &BookListing, owner: UserId) -> Option<Book> {
        let id = PublicBookId::parse(&listing.public_id)?;
        Some(Book::new(id, listing.details.clone(), owner))
    }

    /// Replace the record a listing refers to. False, mutating nothing, when
    /// owner resolution or identifier parsing fails.
    pub async fn update_book(&self, listing: &BookListing) -> bool {
        let Some(owner) = self.resolve_owner(&listing.owner).await else {
            warn!(user = %listing.owner, "cannot update book: owner not found");
            return false;
        };
        let Some(record) = Self::rebuild_record(listing, owner.id()) else {
            warn!(book = %listing.public_id, "cannot update book: malformed public id");
            return false;
        };
        match self.books.update(&record).await {
            Ok(()) => {
                debug!(book = %listing.public_id, "book updated");
                true
            }
            Err(err) => {
                warn!(book = %listing.public_id, error = %err, "book update failed");
                false
            }
        }
    }

    /// Delete the record a listing refers to. Same failure rules as
    /// [`CatalogService::update_book`].
    pub async fn delete_book(&self, listing: &BookListing) -> bool {
        if self.resolve_owner(&listing.owner).await.is_none() {
            warn!(user = %listing.owner, "cannot delete book: owner not found");
            return false;
        }
        let Some(id) = PublicBookId::parse(&listing.public_id) else {
            warn!(book = %listing.public_id, "cannot delete book: malformed public id");
            return false;
        };
        match self.books.delete(id).await {
            Ok(()) => {
                debug!(book = %listing.public_id, "book deleted");
                true
            }
            Err(err) => {
                warn!(book = %listing.public_id, error = %err, "book delete failed");
                false
            }
        }
    }

    /// Delete every book the named user owns.
    ///
    /// Reports success when the user does not exist or owns no books; this
    /// no-op success is documented behaviour the account-delete cascade
    /// relies on. Only a store fault yields false.
    pub async fn delete_all_books_for_user(&self, name: &UserName) -> bool {
        let Some(owner) = self.resolve_owner(name).await else {
            debug!(user = %name, "no user to delete books for");
            return true;
        };
        match self.books.delete_all_for_owner(owner.id()).await {
            Ok(count) => {
                debug!(user = %name, count, "owned books deleted");
                true
            }
            Err(err) => {
                warn!(user = %name, error = %err, "bulk book delete failed");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "catalog_service_tests.rs"]
mod tests;
