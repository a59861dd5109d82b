//! Book records, listings, and the derived public identifier.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{UserId, UserName};

/// Validation errors returned when constructing book value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    /// Price was below zero.
    NegativePrice,
    /// Price was NaN or infinite.
    NonFinitePrice,
}

impl fmt::Display for BookValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativePrice => write!(f, "price must not be negative"),
            Self::NonFinitePrice => write!(f, "price must be a finite number"),
        }
    }
}

impl std::error::Error for BookValidationError {}

/// Store-assigned internal book identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookId(i64);

impl BookId {
    /// Wrap a raw store-assigned identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value, as stored.
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Externally visible book code, always the `BK` prefix plus the decimal
/// internal id.
///
/// Callers never choose it: it is derived when the store assigns the
/// internal id, and [`PublicBookId::parse`] is the exact inverse. Anything
/// that fails to parse is treated as "book not found" by the catalog, never
/// as a distinct fault.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublicBookId(String);

impl PublicBookId {
    /// Fixed two-character prefix carried by every public identifier.
    pub const PREFIX: &'static str = "BK";

    /// Derive the public identifier for a store-assigned internal id.
    pub fn from_internal(id: BookId) -> Self {
        Self(format!("{}{}", Self::PREFIX, id.as_i64()))
    }

    /// Recover the internal id from an externally supplied code.
    ///
    /// Requires the literal `BK` prefix followed by a non-negative decimal
    /// number; everything else yields `None`.
    pub fn parse(raw: &str) -> Option<BookId> {
        let digits = raw.strip_prefix(Self::PREFIX)?;
        let value: i64 = digits.parse().ok()?;
        (value >= 0).then_some(BookId::new(value))
    }

    /// Borrow the code as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PublicBookId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PublicBookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-negative, finite listing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    /// Validate and construct a [`Price`].
    pub fn new(value: f64) -> Result<Self, BookValidationError> {
        if !value.is_finite() {
            return Err(BookValidationError::NonFinitePrice);
        }
        if value < 0.0 {
            return Err(BookValidationError::NegativePrice);
        }
        Ok(Self(value))
    }

    /// Underlying amount.
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl From<Price> for f64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl TryFrom<f64> for Price {
    type Error = BookValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Caller-suppliable book fields shared by stored records, listings, and
/// submissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDetails {
    /// Title of the book.
    pub name: String,
    /// Author credited on the listing.
    pub author: String,
    /// Publication date.
    pub published_on: NaiveDate,
    /// Free-form listing description.
    pub description: String,
    /// Asking price.
    pub price: Price,
    /// Copies available.
    pub quantity: u32,
}

/// Stored book record with resolved owner reference.
///
/// ## Invariants
/// - `public_id` is always `"BK" + decimal(id)`; the constructor derives it,
///   so a record can never carry a stale or caller-chosen code.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    id: BookId,
    public_id: PublicBookId,
    details: BookDetails,
    owner: UserId,
}

impl Book {
    /// Assemble a record from a store-assigned id, deriving the public
    /// identifier.
    pub fn new(id: BookId, details: BookDetails, owner: UserId) -> Self {
        Self {
            id,
            public_id: PublicBookId::from_internal(id),
            details,
            owner,
        }
    }

    /// Store-assigned internal identifier.
    pub const fn id(&self) -> BookId {
        self.id
    }

    /// Derived externally visible code.
    pub const fn public_id(&self) -> &PublicBookId {
        &self.public_id
    }

    /// Caller-suppliable fields.
    pub const fn details(&self) -> &BookDetails {
        &self.details
    }

    /// Owning user's internal identifier.
    pub const fn owner(&self) -> UserId {
        self.owner
    }
}

/// What the store needs to create a book: everything but the identifier,
/// which it assigns (and derives the public code from) in the same write.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    /// Caller-suppliable fields.
    pub details: BookDetails,
    /// Resolved owner id.
    pub owner: UserId,
}

/// Presentation view of a stored book.
///
/// The public id and owner name arrive from forms as untrusted text; the
/// catalog service re-parses and re-resolves both before mutating anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookListing {
    /// Externally visible book code.
    pub public_id: String,
    /// Caller-suppliable fields.
    #[serde(flatten)]
    pub details: BookDetails,
    /// Display name of the owner.
    pub owner: UserName,
}

impl BookListing {
    /// Build a listing from a stored record and its resolved owner name.
    pub fn from_record(book: &Book, owner: &UserName) -> Self {
        Self {
            public_id: book.public_id().as_str().to_owned(),
            details: book.details().clone(),
            owner: owner.clone(),
        }
    }
}

/// A listing submitted for creation; the identifier is store-assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSubmission {
    /// Caller-suppliable fields.
    pub details: BookDetails,
    /// Owner name to resolve against the user store.
    pub owner: UserName,
}
