use serde::{Deserialize, Serialize};

use super::Product;

/// A product snapshot with a quantity and an optional shade.
///
/// Two items are the same cart line iff product id and selected shade both
/// match. Quantity is never zero while the item is in a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_shade: Option<String>,
}

impl CartItem {
    pub fn new(product: Product, selected_shade: Option<String>) -> Self {
        Self {
            product,
            quantity: 1,
            selected_shade,
        }
    }

    pub fn id(&self) -> &str {
        &self.product.id
    }

    pub fn is_line(&self, id: &str, shade: Option<&str>) -> bool {
        self.product.id == id && self.selected_shade.as_deref() == shade
    }

    pub fn line_total(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

/// Cart and wishlist as they are persisted together
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    pub cart: Vec<CartItem>,
    pub wishlist: Vec<String>,
}

impl UserData {
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty() && self.wishlist.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_product;

    #[test]
    fn line_identity_includes_shade() {
        let item = CartItem::new(sample_product("1", 25.0), Some("Joy".into()));
        assert!(item.is_line("1", Some("Joy")));
        assert!(!item.is_line("1", None));
        assert!(!item.is_line("1", Some("Hope")));
        assert!(!item.is_line("2", Some("Joy")));
    }

    #[test]
    fn serializes_flat_like_the_browser_did() {
        let mut item = CartItem::new(sample_product("1", 25.0), Some("Joy".into()));
        item.quantity = 2;
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["id"], "1");
        assert_eq!(value["quantity"], 2);
        assert_eq!(value["selectedShade"], "Joy");
        assert!(value.get("product").is_none());

        let back: CartItem = serde_json::from_value(value).unwrap();
        assert_eq!(back, item);
        assert!((back.line_total() - 50.0).abs() < f64::EPSILON);
    }
}
