mod id;
mod store;

pub use id::UserIdGenerator;
pub use store::AuthStore;
