use std::cmp::Ordering;

use tracing::debug;

use crate::{
    catalog::Catalog,
    database::{SessionSnapshotRepository, UserDataRepository},
    models::{CartItem, FilterState, FilterUpdate, Product, SortBy, UserData, UserId},
    storage::Storage,
    Result,
};

/// Catalogue view state plus the active session's cart and wishlist.
///
/// Mutations only touch memory. Callers persist afterwards through
/// [`ProductStore::persist`], passing the active user id explicitly.
#[derive(Debug, Clone)]
pub struct ProductStore {
    catalog: Catalog,
    cart: Vec<CartItem>,
    wishlist: Vec<String>,
    filters: FilterState,
    search_query: String,
}

impl ProductStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            cart: Vec::new(),
            wishlist: Vec::new(),
            filters: FilterState::default(),
            search_query: String::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn products(&self) -> &[Product] {
        self.catalog.list_all()
    }

    pub fn cart(&self) -> &[CartItem] {
        &self.cart
    }

    pub fn wishlist(&self) -> &[String] {
        &self.wishlist
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn user_data(&self) -> UserData {
        UserData {
            cart: self.cart.clone(),
            wishlist: self.wishlist.clone(),
        }
    }

    /// Session start: replace the in-memory cart and wishlist with what was
    /// saved for `user_id`
    #[tracing::instrument(skip(self, storage), fields(store = "product"))]
    pub fn initialize_user_data<DB: UserDataRepository>(
        &mut self,
        user_id: &UserId,
        storage: &dyn Storage,
    ) -> Result<()> {
        let data = DB::load(user_id, storage)?;
        debug!(
            cart_lines = data.cart.len(),
            wishlist = data.wishlist.len(),
            "restored user data"
        );
        self.cart = data.cart;
        self.wishlist = data.wishlist;
        Ok(())
    }

    /// Session end: empties memory only, saved data stays
    pub fn clear_user_data(&mut self) {
        self.cart.clear();
        self.wishlist.clear();
    }

    /// Writes the session snapshot, and the scoped copy when a user is
    /// signed in. Anonymous carts never reach scoped storage.
    #[tracing::instrument(skip(self, storage), fields(store = "product"))]
    pub fn persist<U: UserDataRepository, P: SessionSnapshotRepository>(
        &self,
        active_user: Option<&UserId>,
        storage: &dyn Storage,
    ) -> Result<()> {
        let data = self.user_data();
        P::save(&data, storage)?;
        if let Some(user_id) = active_user {
            U::save(user_id, &data, storage)?;
        }
        Ok(())
    }

    pub fn add_to_cart(&mut self, product: &Product, shade: Option<&str>) {
        match self
            .cart
            .iter_mut()
            .find(|item| item.is_line(&product.id, shade))
        {
            Some(item) => item.quantity += 1,
            None => self
                .cart
                .push(CartItem::new(product.clone(), shade.map(str::to_owned))),
        }
    }

    /// Removes every line for the product, whatever its shade
    pub fn remove_from_cart(&mut self, id: &str) {
        self.cart.retain(|item| item.id() != id);
    }

    pub fn remove_line(&mut self, id: &str, shade: Option<&str>) {
        self.cart.retain(|item| !item.is_line(id, shade));
    }

    /// Sets the quantity on every line of the product. Quantities of zero or
    /// less remove the product instead.
    ///
    /// Lines are matched by product id alone, so shade variants of one
    /// product cannot be told apart here; use
    /// [`ProductStore::update_line_quantity`] for a single line.
    pub fn update_quantity(&mut self, id: &str, quantity: i32) {
        if quantity <= 0 {
            self.remove_from_cart(id);
            return;
        }
        for item in self.cart.iter_mut().filter(|item| item.id() == id) {
            item.quantity = quantity as u32;
        }
    }

    pub fn update_line_quantity(&mut self, id: &str, shade: Option<&str>, quantity: i32) {
        if quantity <= 0 {
            self.remove_line(id, shade);
            return;
        }
        if let Some(item) = self.cart.iter_mut().find(|item| item.is_line(id, shade)) {
            item.quantity = quantity as u32;
        }
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Flips membership and returns whether the id is now wishlisted
    pub fn toggle_wishlist(&mut self, id: &str) -> bool {
        if self.is_in_wishlist(id) {
            self.wishlist.retain(|entry| entry != id);
            false
        } else {
            self.wishlist.push(id.to_owned());
            true
        }
    }

    pub fn is_in_wishlist(&self, id: &str) -> bool {
        self.wishlist.iter().any(|entry| entry == id)
    }

    /// Wishlisted products in catalogue order; ids with no catalogue entry
    /// are skipped
    pub fn wishlist_products(&self) -> Vec<&Product> {
        self.products()
            .iter()
            .filter(|product| self.is_in_wishlist(&product.id))
            .collect()
    }

    pub fn set_filters(&mut self, update: FilterUpdate) {
        self.filters = self.filters.merge(update);
    }

    pub fn reset_filters(&mut self) {
        self.filters = FilterState::default();
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Search, then category, then price range, then sort
    pub fn filtered_products(&self) -> Vec<&Product> {
        let mut filtered: Vec<&Product> = self.products().iter().collect();

        if !self.search_query.trim().is_empty() {
            let needle = self.search_query.to_lowercase();
            filtered.retain(|product| product.matches_search(&needle));
        }

        filtered.retain(|product| self.filters.category.admits(product.category));
        filtered.retain(|product| self.filters.price_range.contains(product.price));

        // `sort_by` is stable, which `Newest` relies on for its tie order
        match self.filters.sort_by {
            SortBy::Price => filtered.sort_by(|a, b| compare_f64(a.price, b.price)),
            SortBy::Rating => {
                filtered.sort_by(|a, b| compare_f64(b.rating_or_zero(), a.rating_or_zero()))
            }
            SortBy::Newest => filtered.sort_by(|a, b| b.is_new.cmp(&a.is_new)),
            SortBy::Name => filtered.sort_by(|a, b| a.name.cmp(&b.name)),
        }

        filtered
    }

    pub fn total_price(&self) -> f64 {
        self.cart.iter().map(CartItem::line_total).sum()
    }

    /// Units across all lines, not the number of lines
    pub fn cart_count(&self) -> u32 {
        self.cart.iter().map(|item| item.quantity).sum()
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new(Catalog::default())
    }
}

fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
