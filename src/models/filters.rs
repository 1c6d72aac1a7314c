use std::fmt;
use std::str::FromStr;

use strum::{Display, EnumString};

use super::Category;

pub const PRICE_DOMAIN_MIN: f64 = 0.0;
pub const PRICE_DOMAIN_MAX: f64 = 100.0;

const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self::All
    }
}

impl CategoryFilter {
    pub fn admits(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_CATEGORIES {
            return Ok(Self::All);
        }
        Category::from_str(s).map(Self::Only)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "{}", ALL_CATEGORIES),
            Self::Only(category) => write!(f, "{}", category),
        }
    }
}

/// Inclusive price bounds, always inside the `[0, 100]` domain with
/// `min <= max`
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PriceRange {
    min: f64,
    max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        let clamp = |v: f64| {
            if v.is_nan() {
                PRICE_DOMAIN_MIN
            } else {
                v.max(PRICE_DOMAIN_MIN).min(PRICE_DOMAIN_MAX)
            }
        };
        let (min, max) = (clamp(min), clamp(max));
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: PRICE_DOMAIN_MIN,
            max: PRICE_DOMAIN_MAX,
        }
    }
}

impl From<(f64, f64)> for PriceRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self::new(min, max)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SortBy {
    Name,
    Price,
    Rating,
    Newest,
}

impl Default for SortBy {
    fn default() -> Self {
        Self::Name
    }
}

impl SortBy {
    /// Unrecognised sort keys fall back to sorting by name
    pub fn parse_lossy(s: &str) -> Self {
        Self::from_str(s).unwrap_or_default()
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub price_range: PriceRange,
    pub sort_by: SortBy,
}

/// A partial update; `None` fields keep their current value
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FilterUpdate {
    pub category: Option<CategoryFilter>,
    pub price_range: Option<PriceRange>,
    pub sort_by: Option<SortBy>,
}

impl FilterUpdate {
    pub fn category(category: CategoryFilter) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn price_range(min: f64, max: f64) -> Self {
        Self {
            price_range: Some(PriceRange::new(min, max)),
            ..Self::default()
        }
    }

    pub fn sort_by(sort_by: SortBy) -> Self {
        Self {
            sort_by: Some(sort_by),
            ..Self::default()
        }
    }
}

impl FilterState {
    pub fn merge(self, update: FilterUpdate) -> Self {
        Self {
            category: update.category.unwrap_or(self.category),
            price_range: update.price_range.unwrap_or(self.price_range),
            sort_by: update.sort_by.unwrap_or(self.sort_by),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_range_is_clamped_and_ordered() {
        let range = PriceRange::new(150.0, -5.0);
        assert_eq!(range.min(), 0.0);
        assert_eq!(range.max(), 100.0);

        let range = PriceRange::new(30.0, 20.0);
        assert_eq!((range.min(), range.max()), (20.0, 30.0));
        assert!(range.contains(20.0));
        assert!(range.contains(30.0));
        assert!(!range.contains(30.01));
    }

    #[test]
    fn category_filter_parses_the_all_sentinel() {
        assert_eq!(CategoryFilter::from_str("all").unwrap(), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_str("eyes").unwrap(),
            CategoryFilter::Only(Category::Eyes)
        );
        assert!(CategoryFilter::from_str("hair").is_err());
        assert_eq!(CategoryFilter::Only(Category::Blush).to_string(), "blush");
    }

    #[test]
    fn unknown_sort_key_falls_back_to_name() {
        assert_eq!(SortBy::parse_lossy("rating"), SortBy::Rating);
        assert_eq!(SortBy::parse_lossy("popularity"), SortBy::Name);
    }

    #[test]
    fn merge_keeps_unset_fields() {
        let state = FilterState::default()
            .merge(FilterUpdate::sort_by(SortBy::Price))
            .merge(FilterUpdate::category(CategoryFilter::Only(Category::Lips)));

        assert_eq!(state.sort_by, SortBy::Price);
        assert_eq!(state.category, CategoryFilter::Only(Category::Lips));
        assert_eq!(state.price_range, PriceRange::default());
    }
}
