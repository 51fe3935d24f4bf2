// ── User / session store ──
//
// Owns both the current-user snapshot and the persisted session marker.
// Sign-in and sign-out mutate the marker only after the server call
// settles; the view layer decides where to navigate from the returned
// result.

use std::sync::Arc;

use fundly_api::ApiClient;
use fundly_api::types::User;
use secrecy::SecretString;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::Error;
use crate::session::SessionStore;
use crate::store::cell::{StateCell, Subscription};

/// Current-user state. `is_loading` starts `true` and clears once the
/// first fetch settles, success or failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserState {
    pub user: User,
    pub is_loading: bool,
}

impl UserState {
    fn initial() -> Self {
        Self {
            user: User::default(),
            is_loading: true,
        }
    }
}

/// Store for the signed-in account and the session marker.
#[derive(Clone)]
pub struct UserStore {
    api: ApiClient,
    session: Arc<dyn SessionStore>,
    cell: StateCell<UserState>,
}

impl UserStore {
    pub fn new(api: ApiClient, session: Arc<dyn SessionStore>) -> Self {
        Self {
            api,
            session,
            cell: StateCell::new(UserState::initial()),
        }
    }

    /// Snapshot of the latest applied state.
    pub fn state(&self) -> UserState {
        self.cell.get()
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(&UserState) + Send + Sync + 'static,
    ) -> Subscription<UserState> {
        self.cell.subscribe(listener)
    }

    pub fn watch(&self) -> watch::Receiver<UserState> {
        self.cell.watch()
    }

    /// `true` when the persisted session marker is present. Used by the
    /// landing screen to pick the start route.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Fetch the account behind the current session.
    ///
    /// Success replaces the user wholesale; failure resets it to the
    /// empty placeholder. Either way the loading flag clears.
    pub async fn fetch_current(&self) {
        match self.api.current_user().await {
            Ok(user) => self.cell.patch(|state| {
                state.user = user;
                state.is_loading = false;
            }),
            Err(error) => {
                warn!(%error, "failed to fetch current user");
                self.cell.patch(|state| {
                    state.user = User::default();
                    state.is_loading = false;
                });
            }
        }
    }

    /// Sign in with username/password. On success the session marker is
    /// persisted (best-effort). The marker is never set on failure; the
    /// login view maps any error to its fixed fallback message.
    pub async fn sign_in(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        self.api.sign_in(username, password).await?;
        self.session.set_authenticated();
        debug!("signed in");
        Ok(())
    }

    /// End the session. On success the marker is cleared and the user
    /// state resets to its initial placeholder (the view redirects to
    /// the landing route). On failure the marker stays untouched.
    pub async fn sign_out(&self) -> Result<(), Error> {
        self.api.sign_out().await.map_err(|error| {
            warn!(%error, "sign-out failed");
            error
        })?;
        self.session.clear();
        self.cell.patch(|state| *state = UserState::initial());
        Ok(())
    }

    /// Create a new account. A failure may carry the server's
    /// field-keyed validation map (`Error::validation_errors`).
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<User, Error> {
        Ok(self.api.register(username, email, password).await?)
    }

    /// Request a password-reset mail.
    pub async fn request_password_change(&self, email: &str) -> Result<(), Error> {
        Ok(self.api.request_password_change(email).await?)
    }

    /// Complete a password reset with the token from the mail.
    pub async fn change_password(
        &self,
        email: &str,
        token: &str,
        new_password: &SecretString,
    ) -> Result<(), Error> {
        Ok(self.api.change_password(email, token, new_password).await?)
    }
}
