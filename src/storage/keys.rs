use crate::models::UserId;

pub const AUTH_STORE: &str = "auth-store";
pub const USER_CREDENTIALS: &str = "user-credentials";
/// Cart and wishlist of whichever session was active last
pub const SESSION_SNAPSHOT: &str = "rare-beauty-store";

const USER_DATA_PREFIX: &str = "user-data";

pub fn user_cart(user_id: &UserId) -> String {
    user_scoped(user_id, "cart")
}

pub fn user_wishlist(user_id: &UserId) -> String {
    user_scoped(user_id, "wishlist")
}

fn user_scoped(user_id: &UserId, data_type: &str) -> String {
    format!("{}-{}-{}", USER_DATA_PREFIX, user_id, data_type)
}
