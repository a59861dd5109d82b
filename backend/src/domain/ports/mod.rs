//! Driven ports at the persistence boundary.
//!
//! Each port exposes strongly typed errors so adapters map their failures
//! into predictable variants; the services fold those into the sentinel
//! returns the presentation layer expects.

mod book_store;
mod user_store;

#[cfg(test)]
pub use book_store::MockBookStore;
pub use book_store::{BookStore, BookStoreError, FixtureBookStore};
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{FixtureUserStore, UserStore, UserStoreError};
