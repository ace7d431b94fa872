use crate::grpc::internal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

///
/// Emitted exactly once per successful password reset - consumed by the
/// notification and audit collaborators.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PasswordChanged {
    pub event_id: String,
    pub email: String,
    pub changed_at: DateTime<Utc>,
}

impl From<PasswordChanged> for internal::PasswordChangedEvent {
    fn from(event: PasswordChanged) -> Self {
        internal::PasswordChangedEvent {
            event_id: event.event_id,
            email: event.email,
            changed_at: event.changed_at.timestamp_millis() as u64,
        }
    }
}
