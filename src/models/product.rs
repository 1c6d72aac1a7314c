use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Blush,
    Lips,
    Face,
    Eyes,
    Tools,
}

/// An immutable catalogue entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub image: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shades: Option<Vec<String>>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub how_to_use: Option<String>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_bestseller: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u32>,
}

impl Product {
    /// Missing ratings rank as zero
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    pub fn is_on_sale(&self) -> bool {
        matches!(self.original_price, Some(original) if original > self.price)
    }

    pub fn requires_shade(&self) -> bool {
        self.shades.as_ref().map_or(false, |shades| !shades.is_empty())
    }

    pub fn has_shade(&self, shade: &str) -> bool {
        self.shades
            .as_ref()
            .map_or(false, |shades| shades.iter().any(|s| s == shade))
    }

    /// Case-insensitive match against name or description.
    /// `needle` must already be lowercase.
    pub(crate) fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.description.to_lowercase().contains(needle)
    }
}
