use chrono::Utc;

use crate::models::{User, UserId};

/// Issues time-derived user ids (milliseconds since the epoch, as a string).
///
/// Plain wall-clock millis collide when two sign-ups land in the same
/// millisecond, so every id is bumped past both the last issued id and the
/// largest id already in the registry.
#[derive(Debug, Default)]
pub struct UserIdGenerator {
    last_issued: i64,
}

impl UserIdGenerator {
    pub fn next(&mut self, registry: &[User]) -> UserId {
        self.next_at(Utc::now().timestamp_millis(), registry)
    }

    pub(crate) fn next_at(&mut self, now_millis: i64, registry: &[User]) -> UserId {
        let registry_max = registry
            .iter()
            .filter_map(|user| user.id.as_millis())
            .max()
            .unwrap_or(i64::MIN);

        let id = now_millis
            .max(self.last_issued.saturating_add(1))
            .max(registry_max.saturating_add(1));
        self.last_issued = id;
        UserId::from(id.to_string())
    }
}
