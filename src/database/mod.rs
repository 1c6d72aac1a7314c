mod auth;
mod session_snapshot;
mod user_data;

pub use auth::{AuthDatabase, AuthRepository};
pub use session_snapshot::{SessionSnapshotDatabase, SessionSnapshotRepository};
pub use user_data::{UserDataDatabase, UserDataRepository};
