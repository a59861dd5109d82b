//! Session-scoped dashboard summary.

use serde::Serialize;

use super::BookListing;

/// Maximum number of owned books shown on the dashboard.
pub const DASHBOARD_BOOK_LIMIT: usize = 5;

/// Eagerly recomputed summary of the current user's listings.
///
/// Never persisted; it lives only inside the session cell and is rebuilt on
/// login and after every catalog mutation by the session owner.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dashboard {
    profit: f64,
    books_owned: Vec<BookListing>,
}

impl Dashboard {
    /// Build a dashboard from the user's listings, keeping at most
    /// [`DASHBOARD_BOOK_LIMIT`] of them in the order the catalog returned.
    pub fn from_books(mut books: Vec<BookListing>) -> Self {
        books.truncate(DASHBOARD_BOOK_LIMIT);
        Self {
            // TODO: derive profit from order settlement once order
            // processing lands.
            profit: 0.0,
            books_owned: books,
        }
    }

    /// Placeholder profit figure.
    pub const fn profit(&self) -> f64 {
        self.profit
    }

    /// Truncated list of owned books.
    pub fn books_owned(&self) -> &[BookListing] {
        &self.books_owned
    }
}
