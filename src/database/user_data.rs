use crate::{
    models::{CartItem, UserData, UserId},
    storage::{keys, versioned, Storage},
    Result,
};

/// Cart and wishlist scoped to one user, under `user-data-<id>-*` keys
pub trait UserDataRepository {
    fn load(user_id: &UserId, storage: &dyn Storage) -> Result<UserData>;
    fn save(user_id: &UserId, data: &UserData, storage: &dyn Storage) -> Result<()>;
    fn remove(user_id: &UserId, storage: &dyn Storage) -> Result<()>;
}

pub struct UserDataDatabase;

impl UserDataRepository for UserDataDatabase {
    #[tracing::instrument(skip(storage), fields(repository = "user_data"))]
    fn load(user_id: &UserId, storage: &dyn Storage) -> Result<UserData> {
        let cart: Vec<CartItem> = match storage.get_item(&keys::user_cart(user_id))? {
            Some(raw) => versioned::decode(&raw)?,
            None => Vec::new(),
        };
        let wishlist: Vec<String> = match storage.get_item(&keys::user_wishlist(user_id))? {
            Some(raw) => versioned::decode(&raw)?,
            None => Vec::new(),
        };
        Ok(UserData { cart, wishlist })
    }

    #[tracing::instrument(
        skip(data, storage),
        fields(repository = "user_data", cart_lines = data.cart.len(), wishlist = data.wishlist.len())
    )]
    fn save(user_id: &UserId, data: &UserData, storage: &dyn Storage) -> Result<()> {
        storage.set_item(&keys::user_cart(user_id), &versioned::encode(&data.cart)?)?;
        storage.set_item(
            &keys::user_wishlist(user_id),
            &versioned::encode(&data.wishlist)?,
        )
    }

    #[tracing::instrument(skip(storage), fields(repository = "user_data"))]
    fn remove(user_id: &UserId, storage: &dyn Storage) -> Result<()> {
        storage.remove_item(&keys::user_cart(user_id))?;
        storage.remove_item(&keys::user_wishlist(user_id))
    }
}
