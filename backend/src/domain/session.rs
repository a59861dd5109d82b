//! Per-session identity and dashboard state.
//!
//! One [`SessionService`] exists per logical session and is handed through
//! the request context; there is no ambient singleton. The mutable cell sits
//! behind an async lock, so every mutation is atomic from the caller's point
//! of view even when requests within one session race.

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::ports::{BookStore, UserStore};
use crate::domain::{CatalogService, Dashboard, User, UserName, UserService};

#[derive(Debug, Default)]
struct SessionCell {
    current_user: Option<User>,
    dashboard: Option<Dashboard>,
}

/// Session-scoped identity manager.
///
/// State machine: anonymous → authenticated on a successful
/// [`SessionService::set_current_user`]; authenticated → anonymous on
/// [`SessionService::log_out`] (or a successful
/// [`SessionService::close_account`]). There is no
/// re-authentication-without-logout transition.
pub struct SessionService<B, U> {
    users: UserService<U>,
    catalog: CatalogService<B, U>,
    cell: RwLock<SessionCell>,
}

impl<B, U> SessionService<B, U> {
    /// Create an anonymous session over the two services.
    pub fn new(users: UserService<U>, catalog: CatalogService<B, U>) -> Self {
        Self {
            users,
            catalog,
            cell: RwLock::new(SessionCell::default()),
        }
    }
}

impl<B, U> SessionService<B, U>
where
    B: BookStore,
    U: UserStore,
{
    /// Name of the authenticated user, if any.
    pub async fn user_name(&self) -> Option<UserName> {
        self.cell
            .read()
            .await
            .current_user
            .as_ref()
            .map(|user| user.name().clone())
    }

    /// Authenticate the session as the named user.
    ///
    /// Performs the authoritative lookup through the user management
    /// service; on success stores a read-only snapshot and rebuilds the
    /// dashboard, on failure leaves prior session state untouched and
    /// returns false.
    pub async fn set_current_user(&self, name: &UserName) -> bool {
        let Some(user) = self.users.get_user(name).await else {
            warn!(user = %name, "cannot start session: user not found");
            return false;
        };
        let dashboard = self.build_dashboard(user.name()).await;
        let mut cell = self.cell.write().await;
        cell.current_user = Some(user);
        cell.dashboard = Some(dashboard);
        debug!(user = %name, "session authenticated");
        true
    }

    /// Last computed dashboard snapshot; reads never recompute.
    pub async fn user_dashboard(&self) -> Option<Dashboard> {
        self.cell.read().await.dashboard.clone()
    }

    /// Rebuild the dashboard from the current user's listings.
    ///
    /// Called after every catalog mutation by the session owner. With no
    /// current user the precondition is guarded explicitly: the dashboard is
    /// replaced with an empty one instead of faulting.
    pub async fn update_user_dashboard(&self) {
        let dashboard = match self.user_name().await {
            Some(name) => self.build_dashboard(&name).await,
            None => {
                warn!("dashboard rebuild requested with no current user");
                Dashboard::default()
            }
        };
        self.cell.write().await.dashboard = Some(dashboard);
    }

    async fn build_dashboard(&self, name: &UserName) -> Dashboard {
        Dashboard::from_books(self.catalog.get_books_for_user(name).await)
    }

    /// Return the session to anonymous, clearing the user and dashboard
    /// under a single write guard so neither clears without the other.
    pub async fn log_out(&self) {
        let mut cell = self.cell.write().await;
        cell.current_user = None;
        cell.dashboard = None;
    }

    /// Delete the current user's account: owned books first, then the user
    /// record, then log out. False when no user is authenticated or a step
    /// fails; books already removed by an earlier step stay removed.
    pub async fn close_account(&self) -> bool {
        let Some(name) = self.user_name().await else {
            warn!("cannot close account: no current user");
            return false;
        };
        if !self.catalog.delete_all_books_for_user(&name).await {
            warn!(user = %name, "account close aborted: book cleanup failed");
            return false;
        }
        if !self.users.delete_user(&name).await {
            warn!(user = %name, "account close aborted: user delete failed");
            return false;
        }
        self.log_out().await;
        debug!(user = %name, "account closed");
        true
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
