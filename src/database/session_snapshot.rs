use crate::{
    models::UserData,
    storage::{keys, versioned, Storage},
    Result,
};

/// The `rare-beauty-store` record: cart and wishlist of the last active
/// session. It duplicates the scoped user data and is reconciled against it
/// whenever a session starts or ends.
pub trait SessionSnapshotRepository {
    fn load(storage: &dyn Storage) -> Result<UserData>;
    fn save(data: &UserData, storage: &dyn Storage) -> Result<()>;
    fn clear(storage: &dyn Storage) -> Result<()>;
}

pub struct SessionSnapshotDatabase;

impl SessionSnapshotRepository for SessionSnapshotDatabase {
    #[tracing::instrument(skip(storage), fields(repository = "session_snapshot"))]
    fn load(storage: &dyn Storage) -> Result<UserData> {
        match storage.get_item(keys::SESSION_SNAPSHOT)? {
            Some(raw) => versioned::decode(&raw),
            None => Ok(UserData::default()),
        }
    }

    #[tracing::instrument(skip(data, storage), fields(repository = "session_snapshot"))]
    fn save(data: &UserData, storage: &dyn Storage) -> Result<()> {
        storage.set_item(keys::SESSION_SNAPSHOT, &versioned::encode(data)?)
    }

    #[tracing::instrument(skip(storage), fields(repository = "session_snapshot"))]
    fn clear(storage: &dyn Storage) -> Result<()> {
        Self::save(&UserData::default(), storage)
    }
}
