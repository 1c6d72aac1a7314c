use config::{Config, File};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::convert::{TryFrom, TryInto};
use std::env::var;
use std::fmt;
use std::path::PathBuf;

use crate::checkout::DEFAULT_TAX_RATE;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub storage: StorageSettings,
    pub storefront: StorefrontSettings,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    File,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub path: PathBuf,
}

/// Whether cart and wishlist changes need a signed-in user.
///
/// `RequireSession` rejects them with `SignInRequired`. `Ephemeral` lets
/// them through in memory; they reach the session snapshot but never any
/// user's scoped storage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnonymousCartPolicy {
    RequireSession,
    Ephemeral,
}

impl Default for AnonymousCartPolicy {
    fn default() -> Self {
        Self::RequireSession
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorefrontSettings {
    #[serde(default)]
    pub anonymous_cart_policy: AnonymousCartPolicy,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub tax_rate: f64,
}

impl Default for StorefrontSettings {
    fn default() -> Self {
        Self {
            anonymous_cart_policy: AnonymousCartPolicy::default(),
            tax_rate: DEFAULT_TAX_RATE,
        }
    }
}

pub enum Environment {
    Local,
    CI,
    Production,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let mut settings = Config::default();
    let base_path = std::env::current_dir().expect("failed to determine current directory");
    let configuration_directory = base_path.join("configuration");

    settings.merge(File::from(configuration_directory.join("base")).required(true))?;

    let environment: Environment = var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("failed to parse APP_ENVIRONMENT");

    settings
        .merge(File::from(configuration_directory.join(environment.as_str())).required(true))?;

    // e.g. `APP_STOREFRONT__TAX_RATE=0.1`
    settings.merge(config::Environment::with_prefix("app").separator("__"))?;

    settings.try_into()
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::CI => "ci",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "ci" => Ok(Self::CI),
            "production" => Ok(Self::Production),
            other => Err(format!("{} is not a supported environment", other)),
        }
    }
}
