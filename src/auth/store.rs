use chrono::Utc;
use tracing::{info, warn};

use super::UserIdGenerator;
use crate::{
    database::{AuthRepository, UserDataRepository},
    models::{AuthState, User},
    storage::Storage,
    Result, StorefrontError,
};

/// Local account registry plus the single active session.
///
/// State moves Anonymous -> Authenticated on a successful sign-in or
/// sign-up, and back on sign-out or account deletion. Failed operations
/// leave both memory and storage untouched.
#[derive(Debug, Default)]
pub struct AuthStore {
    state: AuthState,
    ids: UserIdGenerator,
}

impl AuthStore {
    #[tracing::instrument(name = "load_auth_store", skip(storage), fields(store = "auth"))]
    pub fn load<DB: AuthRepository>(storage: &dyn Storage) -> Result<Self> {
        let mut state = DB::load_state(storage)?;
        if state.is_authenticated != state.current_user.is_some() {
            warn!(
                is_authenticated = state.is_authenticated,
                "session flag and pointer disagree, treating as signed out"
            );
            state.end_session();
        }
        if let Some(session_id) = state.current_user.as_ref().map(|user| user.id.clone()) {
            match state.find_by_id(&session_id).cloned() {
                Some(registered) => state.start_session(registered),
                None => {
                    warn!(user_id = %session_id, "session user is not registered, treating as signed out");
                    state.end_session();
                }
            }
        }
        Ok(Self {
            state,
            ids: UserIdGenerator::default(),
        })
    }

    pub fn users(&self) -> &[User] {
        &self.state.users
    }

    pub fn current_user(&self) -> Option<&User> {
        self.state.active_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// Exact, case-sensitive email lookup
    pub fn get_user(&self, email: &str) -> Option<&User> {
        self.state.find_by_email(email)
    }

    #[tracing::instrument(skip(self, password, storage), fields(store = "auth"))]
    pub fn sign_up<DB: AuthRepository>(
        &mut self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
        storage: &dyn Storage,
    ) -> Result<User> {
        if self.state.find_by_email(email).is_some() {
            warn!("sign up rejected, email already registered");
            return Err(StorefrontError::DuplicateUser);
        }

        let user = User {
            id: self.ids.next(&self.state.users),
            email: email.to_owned(),
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            created_at: Utc::now(),
        };

        let mut credentials = DB::load_credentials(storage)?;
        credentials.insert(email, password);
        DB::save_credentials(&credentials, storage)?;

        let mut next = self.state.clone();
        next.users.push(user.clone());
        next.start_session(user.clone());
        DB::save_state(&next, storage)?;
        self.state = next;

        info!(user_id = %user.id, "account created");
        Ok(user)
    }

    #[tracing::instrument(skip(self, password, storage), fields(store = "auth"))]
    pub fn sign_in<DB: AuthRepository>(
        &mut self,
        email: &str,
        password: &str,
        storage: &dyn Storage,
    ) -> Result<User> {
        let user = self
            .state
            .find_by_email(email)
            .cloned()
            .ok_or(StorefrontError::UserNotFound)?;

        // No credential entry (registries drifted apart) reads as a mismatch
        if !DB::load_credentials(storage)?.verify(email, password) {
            warn!(user_id = %user.id, "sign in rejected, password mismatch");
            return Err(StorefrontError::InvalidPassword);
        }

        let mut next = self.state.clone();
        next.start_session(user.clone());
        DB::save_state(&next, storage)?;
        self.state = next;

        info!(user_id = %user.id, "signed in");
        Ok(user)
    }

    #[tracing::instrument(skip(self, storage), fields(store = "auth"))]
    pub fn sign_out<DB: AuthRepository>(&mut self, storage: &dyn Storage) -> Result<()> {
        self.state.end_session();
        DB::save_state(&self.state, storage)
    }

    /// Removes the active user's credentials, scoped cart/wishlist and
    /// registry entry, then ends the session. Without a session this is a
    /// no-op returning `None`.
    #[tracing::instrument(skip(self, storage), fields(store = "auth"))]
    pub fn delete_account<DB: AuthRepository, U: UserDataRepository>(
        &mut self,
        storage: &dyn Storage,
    ) -> Result<Option<User>> {
        let user = match self.current_user() {
            Some(user) => user.clone(),
            None => return Ok(None),
        };

        let mut credentials = DB::load_credentials(storage)?;
        if !credentials.remove(&user.email) {
            warn!(user_id = %user.id, "no credentials stored for deleted account");
        }
        DB::save_credentials(&credentials, storage)?;

        U::remove(&user.id, storage)?;

        let mut next = self.state.clone();
        next.users.retain(|u| u.id != user.id);
        next.end_session();
        DB::save_state(&next, storage)?;
        self.state = next;

        info!(user_id = %user.id, "account deleted");
        Ok(Some(user))
    }
}
