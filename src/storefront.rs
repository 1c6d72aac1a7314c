use tracing::{debug, info};

use crate::{
    auth::AuthStore,
    catalog::Catalog,
    checkout::{CheckoutFlow, OrderConfirmation, OrderSummary, PaymentMethod},
    configuration::{AnonymousCartPolicy, StorefrontSettings},
    database::{
        AuthDatabase, SessionSnapshotDatabase, SessionSnapshotRepository, UserDataDatabase,
    },
    models::{CartItem, FilterUpdate, Product, User, UserId},
    product_store::ProductStore,
    storage::Storage,
    Result, StorefrontError,
};

/// Session-aware entry point for the UI layer.
///
/// Owns the storage handle and both stores. Session transitions drive the
/// product store's lifecycle hooks here, and every cart or wishlist change
/// is persisted with the active user id handed over explicitly.
pub struct Storefront<S: Storage> {
    storage: S,
    auth: AuthStore,
    products: ProductStore,
    settings: StorefrontSettings,
}

impl<S: Storage> Storefront<S> {
    /// Restores auth state from `storage` and reconciles the session snapshot
    /// with the scoped user data: a restored session loads that user's scoped
    /// cart (the snapshot is rewritten from it), an anonymous start empties both
    /// memory and snapshot.
    #[tracing::instrument(name = "open_storefront", skip(storage, settings), fields(store = "storefront"))]
    pub fn open(storage: S, settings: StorefrontSettings) -> Result<Self> {
        Self::with_catalog(storage, settings, Catalog::default())
    }

    pub fn with_catalog(storage: S, settings: StorefrontSettings, catalog: Catalog) -> Result<Self> {
        let auth = AuthStore::load::<AuthDatabase>(&storage)?;
        let mut storefront = Self {
            storage,
            auth,
            products: ProductStore::new(catalog),
            settings,
        };

        let stale_snapshot = SessionSnapshotDatabase::load(&storefront.storage).unwrap_or_default();
        match storefront.active_user_id() {
            Some(user_id) => {
                debug!(user_id = %user_id, "restoring session");
                storefront.start_user_session(&user_id)?;
            }
            None => {
                if !stale_snapshot.is_empty() {
                    debug!(
                        cart_lines = stale_snapshot.cart.len(),
                        "discarding anonymous snapshot"
                    );
                }
                storefront.end_user_session()?;
            }
        }
        Ok(storefront)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn auth(&self) -> &AuthStore {
        &self.auth
    }

    pub fn products(&self) -> &ProductStore {
        &self.products
    }

    pub fn catalog(&self) -> &Catalog {
        self.products.catalog()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.auth.current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    pub fn get_user(&self, email: &str) -> Option<&User> {
        self.auth.get_user(email)
    }

    pub fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<User> {
        let user =
            self.auth
                .sign_up::<AuthDatabase>(email, password, first_name, last_name, &self.storage)?;
        self.start_user_session(&user.id)?;
        Ok(user)
    }

    pub fn sign_in(&mut self, email: &str, password: &str) -> Result<User> {
        let user = self
            .auth
            .sign_in::<AuthDatabase>(email, password, &self.storage)?;
        self.start_user_session(&user.id)?;
        Ok(user)
    }

    pub fn sign_out(&mut self) -> Result<()> {
        self.auth.sign_out::<AuthDatabase>(&self.storage)?;
        self.end_user_session()
    }

    pub fn delete_account(&mut self) -> Result<Option<User>> {
        let deleted = self
            .auth
            .delete_account::<AuthDatabase, UserDataDatabase>(&self.storage)?;
        if deleted.is_some() {
            self.end_user_session()?;
        }
        Ok(deleted)
    }

    /// Quick add: no shade is needed, but one that is given must belong to
    /// the product
    pub fn add_to_cart(&mut self, product: &Product, shade: Option<&str>) -> Result<()> {
        ensure_known_shade(product, shade)?;
        self.mutate_user_data(|products| products.add_to_cart(product, shade))
    }

    /// Product page add: shaded products need a shade, and all `quantity`
    /// units go onto the same line
    #[tracing::instrument(skip(self), fields(store = "storefront"))]
    pub fn add_to_cart_with_quantity(
        &mut self,
        id: &str,
        shade: Option<&str>,
        quantity: u32,
    ) -> Result<()> {
        let product = self
            .catalog()
            .find_by_id(id)
            .cloned()
            .ok_or_else(|| StorefrontError::ProductNotFound(id.to_owned()))?;
        if shade.is_none() && product.requires_shade() {
            return Err(StorefrontError::ShadeRequired);
        }
        ensure_known_shade(&product, shade)?;

        self.mutate_user_data(|products| {
            for _ in 0..quantity {
                products.add_to_cart(&product, shade);
            }
        })
    }

    /// Looks the product up in the catalogue first; unknown ids are ignored
    /// and reported as `false`
    pub fn add_to_cart_by_id(&mut self, id: &str, shade: Option<&str>) -> Result<bool> {
        let product = match self.catalog().find_by_id(id) {
            Some(product) => product.clone(),
            None => return Ok(false),
        };
        self.add_to_cart(&product, shade)?;
        Ok(true)
    }

    pub fn remove_from_cart(&mut self, id: &str) -> Result<()> {
        self.mutate_user_data(|products| products.remove_from_cart(id))
    }

    pub fn remove_line(&mut self, id: &str, shade: Option<&str>) -> Result<()> {
        self.mutate_user_data(|products| products.remove_line(id, shade))
    }

    pub fn update_quantity(&mut self, id: &str, quantity: i32) -> Result<()> {
        self.mutate_user_data(|products| products.update_quantity(id, quantity))
    }

    pub fn update_line_quantity(
        &mut self,
        id: &str,
        shade: Option<&str>,
        quantity: i32,
    ) -> Result<()> {
        self.mutate_user_data(|products| products.update_line_quantity(id, shade, quantity))
    }

    pub fn clear_cart(&mut self) -> Result<()> {
        self.mutate_user_data(ProductStore::clear_cart)
    }

    /// Returns whether the product is wishlisted afterwards
    pub fn toggle_wishlist(&mut self, id: &str) -> Result<bool> {
        self.mutate_user_data(|products| products.toggle_wishlist(id))
    }

    pub fn cart(&self) -> &[CartItem] {
        self.products.cart()
    }

    pub fn wishlist(&self) -> &[String] {
        self.products.wishlist()
    }

    pub fn set_filters(&mut self, update: FilterUpdate) {
        self.products.set_filters(update);
    }

    pub fn reset_filters(&mut self) {
        self.products.reset_filters();
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.products.set_search_query(query);
    }

    pub fn filtered_products(&self) -> Vec<&Product> {
        self.products.filtered_products()
    }

    pub fn total_price(&self) -> f64 {
        self.products.total_price()
    }

    pub fn cart_count(&self) -> u32 {
        self.products.cart_count()
    }

    pub fn order_summary(&self) -> OrderSummary {
        OrderSummary::from_subtotal(self.total_price(), self.settings.tax_rate)
    }

    /// Opens the multi-step checkout over the current cart subtotal. The
    /// flow applies tax itself, so it is handed the pre-tax amount.
    pub fn begin_checkout(&self) -> CheckoutFlow {
        CheckoutFlow::new(self.total_price(), self.settings.tax_rate)
    }

    /// One-click purchase of the whole cart, which is emptied afterwards
    #[tracing::instrument(skip(self), fields(store = "storefront"))]
    pub fn buy_now(&mut self) -> Result<OrderConfirmation> {
        self.ensure_cart_allowed()?;
        if self.cart().is_empty() {
            return Err(StorefrontError::EmptyCart);
        }
        let confirmation = OrderConfirmation::new(self.order_summary(), PaymentMethod::default());
        self.clear_cart()?;
        info!(reference = %confirmation.reference, "buy now order placed");
        Ok(confirmation)
    }

    fn active_user_id(&self) -> Option<UserId> {
        self.auth.current_user().map(|user| user.id.clone())
    }

    fn ensure_cart_allowed(&self) -> Result<()> {
        match self.settings.anonymous_cart_policy {
            AnonymousCartPolicy::RequireSession if !self.is_authenticated() => {
                Err(StorefrontError::SignInRequired)
            }
            _ => Ok(()),
        }
    }

    fn mutate_user_data<T>(&mut self, mutation: impl FnOnce(&mut ProductStore) -> T) -> Result<T> {
        self.ensure_cart_allowed()?;
        let outcome = mutation(&mut self.products);
        self.persist_user_data()?;
        Ok(outcome)
    }

    fn persist_user_data(&self) -> Result<()> {
        let active_user = self.active_user_id();
        self.products
            .persist::<UserDataDatabase, SessionSnapshotDatabase>(active_user.as_ref(), &self.storage)
    }

    fn start_user_session(&mut self, user_id: &UserId) -> Result<()> {
        self.products
            .initialize_user_data::<UserDataDatabase>(user_id, &self.storage)?;
        SessionSnapshotDatabase::save(&self.products.user_data(), &self.storage)
    }

    fn end_user_session(&mut self) -> Result<()> {
        self.products.clear_user_data();
        SessionSnapshotDatabase::clear(&self.storage)
    }
}

fn ensure_known_shade(product: &Product, shade: Option<&str>) -> Result<()> {
    match shade {
        Some(shade) if !product.has_shade(shade) => Err(StorefrontError::UnknownShade {
            product: product.name.clone(),
            shade: shade.to_owned(),
        }),
        _ => Ok(()),
    }
}
