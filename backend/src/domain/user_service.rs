//! User management: account CRUD, credential checks, and principal lookup.
//!
//! Every method is total over its inputs: lookup misses come back as
//! `None`/`false`, and store faults are logged here and folded into the same
//! sentinels. The one exception is [`UserService::load_principal`], whose
//! security-subsystem contract requires a typed failure.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{Credentials, Principal, PrincipalError, User, UserDraft, UserName};

/// User management service over the user store.
pub struct UserService<U> {
    users: Arc<U>,
}

impl<U> Clone for UserService<U> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
        }
    }
}

impl<U> UserService<U> {
    /// Create a new service with the given store.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

impl<U> UserService<U>
where
    U: UserStore,
{
    async fn resolve(&self, name: &UserName) -> Option<User> {
        match self.users.find_by_name(name).await {
            Ok(found) => found,
            Err(err) => {
                warn!(user = %name, error = %err, "user lookup failed");
                None
            }
        }
    }

    /// True iff a user with exactly this name exists and its stored password
    /// equals the supplied one.
    ///
    /// The comparison is verbatim: hashing policy belongs to the caller, and
    /// no lockout, throttling, or timing-safe comparison is applied here.
    pub async fn authenticate(&self, credentials: &Credentials) -> bool {
        let Some(user) = self.resolve(credentials.name()).await else {
            warn!(user = %credentials.name(), "authentication failed: unknown user");
            return false;
        };
        let matched = user.password() == credentials.password();
        if matched {
            debug!(user = %credentials.name(), "authentication succeeded");
        } else {
            warn!(user = %credentials.name(), "authentication failed: password mismatch");
        }
        matched
    }

    /// Exact-match existence check used by sign-up forms.
    ///
    /// Advisory only: the store's unique-name constraint is what actually
    /// refuses a concurrent duplicate create.
    pub async fn is_duplicate_user(&self, name: &UserName) -> bool {
        self.resolve(name).await.is_some()
    }

    /// Fetch the user with the given name, if any.
    pub async fn get_user(&self, name: &UserName) -> Option<User> {
        self.resolve(name).await
    }

    /// Create a new account. False when the name is taken or the store
    /// refuses the write.
    pub async fn add_user(&self, draft: &UserDraft) -> bool {
        match self.users.create(draft).await {
            Ok(user) => {
                debug!(user = %user.name(), id = %user.id(), "user created");
                true
            }
            Err(UserStoreError::DuplicateName { name }) => {
                warn!(user = %name, "sign-up refused: name already exists");
                false
            }
            Err(err) => {
                warn!(user = %draft.name, error = %err, "user create failed");
                false
            }
        }
    }

    /// Replace the account fields of an existing user, resolved by name.
    /// False when no such user exists.
    pub async fn update_user(&self, draft: &UserDraft) -> bool {
        let Some(existing) = self.resolve(&draft.name).await else {
            warn!(user = %draft.name, "cannot update: user not found");
            return false;
        };
        let updated = User::new(existing.id(), draft.clone());
        match self.users.update(&updated).await {
            Ok(()) => {
                debug!(user = %draft.name, "user updated");
                true
            }
            Err(err) => {
                warn!(user = %draft.name, error = %err, "user update failed");
                false
            }
        }
    }

    /// Delete the user with the given name. False when no such user exists.
    ///
    /// Callers deleting a whole account remove the user's books first; see
    /// [`crate::domain::SessionService::close_account`].
    pub async fn delete_user(&self, name: &UserName) -> bool {
        let Some(existing) = self.resolve(name).await else {
            warn!(user = %name, "cannot delete: user not found");
            return false;
        };
        match self.users.delete(existing.id()).await {
            Ok(()) => {
                debug!(user = %name, "user deleted");
                true
            }
            Err(err) => {
                warn!(user = %name, error = %err, "user delete failed");
                false
            }
        }
    }

    /// Load the credential-bearing principal for the security subsystem.
    ///
    /// Backed by the same name lookup as [`UserService::authenticate`] so
    /// the two can never diverge.
    pub async fn load_principal(&self, name: &UserName) -> Result<Principal, PrincipalError> {
        let found = self
            .users
            .find_by_name(name)
            .await
            .map_err(|err| PrincipalError::Unavailable {
                message: err.to_string(),
            })?;
        match found {
            Some(user) => Ok(Principal::new(
                user.name().clone(),
                user.password().to_owned(),
            )),
            None => {
                warn!(user = %name, "principal lookup failed: user not found");
                Err(PrincipalError::NotFound {
                    name: name.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
