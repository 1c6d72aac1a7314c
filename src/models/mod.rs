mod auth;
mod cart_item;
pub mod filters;
mod product;
mod user;

pub use auth::{AuthState, Credentials};
pub use cart_item::{CartItem, UserData};
pub use filters::{CategoryFilter, FilterState, FilterUpdate, PriceRange, SortBy};
pub use product::{Category, Product};
pub use user::{User, UserId};
