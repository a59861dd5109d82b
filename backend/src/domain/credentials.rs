//! Login credentials submitted for authentication.
//!
//! Keep inbound payload parsing outside the services by validating the raw
//! strings here before anything touches the user store.

use std::fmt;

use zeroize::Zeroizing;

use super::{UserName, UserValidationError};

/// Domain error returned when credential values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// The supplied name failed [`UserName`] validation.
    InvalidName(UserValidationError),
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName(err) => write!(f, "invalid user name: {err}"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated credential pair used by [`crate::domain::UserService`].
///
/// ## Invariants
/// - `name` satisfies [`UserName`] validation.
/// - `password` is non-empty but otherwise kept verbatim, including interior
///   whitespace, so comparisons against stored values stay exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    name: UserName,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw name/password inputs.
    pub fn try_from_parts(name: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let name = UserName::new(name).map_err(CredentialsValidationError::InvalidName)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            name,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Account name to look up.
    pub const fn name(&self) -> &UserName {
        &self.name
    }

    /// Password string supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", "pw")]
    #[case("  ", "pw")]
    #[case(" alice", "pw")]
    fn invalid_names_are_rejected(#[case] name: &str, #[case] password: &str) {
        let err = Credentials::try_from_parts(name, password).expect_err("must fail");
        assert!(matches!(err, CredentialsValidationError::InvalidName(_)));
    }

    #[rstest]
    fn empty_password_is_rejected() {
        let err = Credentials::try_from_parts("alice", "").expect_err("must fail");
        assert_eq!(err, CredentialsValidationError::EmptyPassword);
    }

    #[rstest]
    #[case("alice", "s3cret")]
    #[case("bob", "correct horse battery staple")]
    fn valid_pairs_are_kept_verbatim(#[case] name: &str, #[case] password: &str) {
        let creds = Credentials::try_from_parts(name, password).expect("valid credentials");
        assert_eq!(creds.name().as_str(), name);
        assert_eq!(creds.password(), password);
    }
}
