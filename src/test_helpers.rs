use chrono::Utc;

use crate::{
    configuration::{AnonymousCartPolicy, StorefrontSettings},
    models::{Category, Product, User, UserId},
};

pub fn sample_product(id: &str, price: f64) -> Product {
    Product {
        id: id.to_owned(),
        name: format!("Sample {}", id),
        description: "A sample product".to_owned(),
        price,
        original_price: None,
        image: String::new(),
        category: Category::Blush,
        shades: None,
        features: vec![],
        ingredients: None,
        how_to_use: None,
        is_new: false,
        is_bestseller: false,
        rating: Some(4.0),
        reviews: None,
    }
}

pub fn sample_user(id: &str, email: &str) -> User {
    User {
        id: UserId::from(id),
        email: email.to_owned(),
        first_name: "Sample".to_owned(),
        last_name: "User".to_owned(),
        created_at: Utc::now(),
    }
}

pub fn storefront_settings(policy: AnonymousCartPolicy) -> StorefrontSettings {
    StorefrontSettings {
        anonymous_cart_policy: policy,
        ..StorefrontSettings::default()
    }
}

pub fn assert_on_decimal(data_to_check: f64, expected: f64) {
    let abs_diff = (data_to_check - expected).abs();
    assert!(abs_diff < 0.0005, "{} != {}", data_to_check, expected);
}
