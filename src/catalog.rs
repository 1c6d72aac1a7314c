use lazy_static::lazy_static;

use crate::models::{Category, Product};

lazy_static! {
    static ref PRODUCTS: Vec<Product> = vec![
        Product {
            id: "1".into(),
            name: "Soft Pinch Liquid Blush".into(),
            description: "A weightless, long-lasting liquid blush that blends seamlessly for a natural, radiant flush.".into(),
            price: 25.0,
            original_price: None,
            image: "product-blush.jpg".into(),
            category: Category::Blush,
            shades: Some(strings(&["Hope", "Joy", "Peace", "Grateful", "Bliss"])),
            features: strings(&["Long-lasting", "Buildable", "Natural finish", "Cruelty-free"]),
            ingredients: Some(strings(&["Hyaluronic Acid", "Vitamin E", "Plant-based pigments"])),
            how_to_use: Some("Apply 1-2 dots to the apples of cheeks and blend with fingertips or brush.".into()),
            is_new: false,
            is_bestseller: true,
            rating: Some(4.8),
            reviews: Some(2847),
        },
        Product {
            id: "2".into(),
            name: "Soft Pinch Tinted Lip Oil".into(),
            description: "A nourishing lip oil that delivers a hint of color with incredible shine and comfort.".into(),
            price: 22.0,
            original_price: None,
            image: "product-lip.jpg".into(),
            category: Category::Lips,
            shades: Some(strings(&["Serenity", "Clarity", "Wisdom", "Courage", "Strength"])),
            features: strings(&["Hydrating", "Glossy finish", "Non-sticky", "Buildable color"]),
            ingredients: Some(strings(&["Jojoba Oil", "Vitamin E", "Coconut Oil"])),
            how_to_use: Some("Apply directly to lips. Layer for more intense color and shine.".into()),
            is_new: true,
            is_bestseller: false,
            rating: Some(4.7),
            reviews: Some(1523),
        },
        Product {
            id: "3".into(),
            name: "Warm Wishes Effortless Bronzer Stick".into(),
            description: "An easy-to-use bronzer stick that warms and defines your complexion with a natural finish.".into(),
            price: 28.0,
            original_price: None,
            image: "product-bronzer.jpg".into(),
            category: Category::Face,
            shades: Some(strings(&["Power Boost", "Gratitude", "Optimistic", "Ambitious"])),
            features: strings(&["Cream-to-powder", "Buildable", "Travel-friendly", "Natural finish"]),
            ingredients: Some(strings(&["Coconut Oil", "Vitamin E", "Mineral pigments"])),
            how_to_use: Some("Apply to areas where sun naturally hits: forehead, cheeks, nose, and chin.".into()),
            is_new: false,
            is_bestseller: true,
            rating: Some(4.6),
            reviews: Some(1892),
        },
        Product {
            id: "4".into(),
            name: "Positive Light Liquid Luminizer".into(),
            description: "A luminous highlighter that creates a natural, lit-from-within glow.".into(),
            price: 27.0,
            original_price: Some(32.0),
            image: "product-highlighter.jpg".into(),
            category: Category::Face,
            shades: Some(strings(&["Exhilarate", "Enlighten", "Inspire", "Motivate"])),
            features: strings(&["Luminous finish", "Buildable", "Lightweight", "Long-wearing"]),
            ingredients: Some(strings(&["Mica", "Vitamin E", "Light-reflecting particles"])),
            how_to_use: Some("Apply to high points of the face: cheekbones, bridge of nose, and cupid's bow.".into()),
            is_new: false,
            is_bestseller: false,
            rating: Some(4.5),
            reviews: Some(967),
        },
    ];
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// The read-only product list, in definition order
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            products: PRODUCTS.clone(),
        }
    }
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn list_all(&self) -> &[Product] {
        &self.products
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    pub fn bestsellers(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|product| product.is_bestseller)
    }

    pub fn new_arrivals(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|product| product.is_new)
    }
}
