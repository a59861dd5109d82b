//! User identity and account records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned when constructing user value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Name was empty once inspected.
    EmptyName,
    /// Name carries leading or trailing whitespace.
    NameHasSurroundingWhitespace,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "user name must not be empty"),
            Self::NameHasSurroundingWhitespace => {
                write!(f, "user name must not contain surrounding whitespace")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Store-assigned internal user identifier.
///
/// Assigned once on the first persistence write and immutable afterwards.
/// Book records reference their owner through this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw store-assigned identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value, as stored.
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique account name used as the exact-match, case-sensitive identity key.
///
/// ## Invariants
/// - Non-empty.
/// - No surrounding whitespace; padding is rejected rather than trimmed so
///   lookups stay exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`].
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(name.into())
    }

    fn from_owned(name: String) -> Result<Self, UserValidationError> {
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if name.trim() != name {
            return Err(UserValidationError::NameHasSurroundingWhitespace);
        }
        Ok(Self(name))
    }

    /// Borrow the name as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Account fields suppliable by sign-up and account-edit forms.
///
/// The password is an opaque string: hashing policy belongs to the caller,
/// so some callers store a pre-hashed value and others the raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    /// Unique account name; doubles as the identity key on edits.
    pub name: UserName,
    /// Opaque credential string.
    pub password: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
}

/// Stored user record.
///
/// Owned by the persistence layer; the business layer holds it only as a
/// per-request or per-session snapshot and never caches it beyond that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: UserName,
    password: String,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
}

impl User {
    /// Assemble a record from a store-assigned id and draft fields.
    pub fn new(id: UserId, draft: UserDraft) -> Self {
        let UserDraft {
            name,
            password,
            first_name,
            last_name,
            email,
            phone,
        } = draft;
        Self {
            id,
            name,
            password,
            first_name,
            last_name,
            email,
            phone,
        }
    }

    /// Store-assigned internal identifier.
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Unique account name.
    pub const fn name(&self) -> &UserName {
        &self.name
    }

    /// Stored opaque credential string.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Given name.
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Family name.
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// Contact email address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Contact phone number.
    pub fn phone(&self) -> &str {
        self.phone.as_str()
    }

    /// Copy the account fields back into draft form, e.g. for edit prefill.
    pub fn to_draft(&self) -> UserDraft {
        UserDraft {
            name: self.name.clone(),
            password: self.password.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}
