pub mod auth;
pub mod catalog;
pub mod checkout;
pub mod configuration;
pub mod database;
mod error;
pub mod models;
pub mod newsletter;
pub mod product_store;
pub mod storage;
mod storefront;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use configuration::get_configuration;
pub use error::StorefrontError;
pub use storefront::Storefront;

pub type Result<T> = std::result::Result<T, StorefrontError>;
