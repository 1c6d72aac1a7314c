use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{User, UserId};

/// The persisted `auth-store` record: registry plus session pointer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub current_user: Option<User>,
    #[serde(default)]
    pub is_authenticated: bool,
}

impl AuthState {
    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|user| user.email == email)
    }

    pub fn find_by_id(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|user| &user.id == id)
    }

    /// A session only counts when both the flag and the pointer are set
    pub fn active_user(&self) -> Option<&User> {
        if self.is_authenticated {
            self.current_user.as_ref()
        } else {
            None
        }
    }

    pub(crate) fn start_session(&mut self, user: User) {
        self.current_user = Some(user);
        self.is_authenticated = true;
    }

    pub(crate) fn end_session(&mut self) {
        self.current_user = None;
        self.is_authenticated = false;
    }
}

/// Email to password map, stored under its own key apart from the registry.
///
/// Passwords are kept in plain text, exactly as the storefront always has.
/// The separate key is a convention only, not a security boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credentials(BTreeMap<String, String>);

impl Credentials {
    pub fn insert(&mut self, email: &str, password: &str) {
        self.0.insert(email.to_owned(), password.to_owned());
    }

    pub fn remove(&mut self, email: &str) -> bool {
        self.0.remove(email).is_some()
    }

    pub fn contains(&self, email: &str) -> bool {
        self.0.contains_key(email)
    }

    /// A missing entry never matches
    pub fn verify(&self, email: &str, password: &str) -> bool {
        self.0.get(email).map_or(false, |stored| stored == password)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
