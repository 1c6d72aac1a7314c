use crate::{
    models::{AuthState, Credentials},
    storage::{keys, versioned, Storage},
    Result,
};

pub trait AuthRepository {
    fn load_state(storage: &dyn Storage) -> Result<AuthState>;
    fn save_state(state: &AuthState, storage: &dyn Storage) -> Result<()>;
    fn load_credentials(storage: &dyn Storage) -> Result<Credentials>;
    fn save_credentials(credentials: &Credentials, storage: &dyn Storage) -> Result<()>;
}

pub struct AuthDatabase;

impl AuthRepository for AuthDatabase {
    #[tracing::instrument(skip(storage), fields(repository = "auth"))]
    fn load_state(storage: &dyn Storage) -> Result<AuthState> {
        match storage.get_item(keys::AUTH_STORE)? {
            Some(raw) => versioned::decode(&raw),
            None => Ok(AuthState::default()),
        }
    }

    #[tracing::instrument(skip(state, storage), fields(repository = "auth", users = state.users.len()))]
    fn save_state(state: &AuthState, storage: &dyn Storage) -> Result<()> {
        storage.set_item(keys::AUTH_STORE, &versioned::encode(state)?)
    }

    #[tracing::instrument(skip(storage), fields(repository = "auth"))]
    fn load_credentials(storage: &dyn Storage) -> Result<Credentials> {
        match storage.get_item(keys::USER_CREDENTIALS)? {
            Some(raw) => versioned::decode(&raw),
            None => Ok(Credentials::default()),
        }
    }

    #[tracing::instrument(skip(credentials, storage), fields(repository = "auth"))]
    fn save_credentials(credentials: &Credentials, storage: &dyn Storage) -> Result<()> {
        storage.set_item(keys::USER_CREDENTIALS, &versioned::encode(credentials)?)
    }
}
