//! Security principal loaded for the external authentication filter.

use std::fmt;

use thiserror::Error;

use super::UserName;

/// Authority granted to a principal. The marketplace currently grants every
/// account the same single role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    /// Ordinary marketplace account.
    User,
}

impl Authority {
    /// Wire value expected by the security subsystem.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
        }
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credential-bearing principal handed to the security subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    name: UserName,
    password: String,
    authorities: Vec<Authority>,
}

impl Principal {
    /// Build a principal carrying the fixed [`Authority::User`] role.
    pub fn new(name: UserName, password: String) -> Self {
        Self {
            name,
            password,
            authorities: vec![Authority::User],
        }
    }

    /// Account name of the principal.
    pub const fn name(&self) -> &UserName {
        &self.name
    }

    /// Stored credential string the filter compares against.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Granted authorities.
    pub fn authorities(&self) -> &[Authority] {
        &self.authorities
    }
}

/// Failure loading a principal.
///
/// `NotFound` is the one business-layer condition surfaced as a typed error
/// rather than a sentinel: the security subsystem is contractually required
/// to treat it as an authentication failure, not a system fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrincipalError {
    /// No account with the requested name exists.
    #[error("user {name} not found")]
    NotFound {
        /// Name that failed to resolve.
        name: String,
    },
    /// The user store could not be consulted.
    #[error("principal lookup unavailable: {message}")]
    Unavailable {
        /// Adapter-supplied failure description.
        message: String,
    },
}
