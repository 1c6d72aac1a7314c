use thiserror::Error;
use tracing::error;

#[derive(Debug, Error, PartialEq)]
pub enum StorefrontError {
    #[error("User already exists with this email")]
    DuplicateUser,

    #[error("User not found. Please create an account first.")]
    UserNotFound,

    #[error("Invalid password. Please try again.")]
    InvalidPassword,

    #[error("Please sign in to manage your cart and wishlist")]
    SignInRequired,

    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Product {0} was not found")]
    ProductNotFound(String),

    #[error("Please choose your preferred shade before adding to cart")]
    ShadeRequired,

    #[error("{shade} is not a shade of {product}")]
    UnknownShade { product: String, shade: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Stored data was malformed")]
    MalformedData,

    #[error("Stored record has unsupported version {0}")]
    UnsupportedVersion(u32),
}

impl StorefrontError {
    /// Errors the user can act on (bad credentials, missing session) as
    /// opposed to failures of the storage tier
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::DuplicateUser
                | Self::UserNotFound
                | Self::InvalidPassword
                | Self::SignInRequired
                | Self::EmptyCart
                | Self::ProductNotFound(_)
                | Self::ShadeRequired
                | Self::UnknownShade { .. }
        )
    }
}

impl From<serde_json::Error> for StorefrontError {
    fn from(e: serde_json::Error) -> StorefrontError {
        use serde_json::error::Category::*;
        error!(err = ?e, "JSON Serde error occurred");

        match e.classify() {
            Syntax | Data | Eof => StorefrontError::MalformedData,
            Io => StorefrontError::Storage(e.to_string()),
        }
    }
}

impl From<std::io::Error> for StorefrontError {
    fn from(e: std::io::Error) -> StorefrontError {
        error!(err = ?e, kind = ?e.kind(), "storage I/O error occurred");
        StorefrontError::Storage(e.to_string())
    }
}
