use parking_lot::Mutex;
use std::collections::HashMap;
use chrono::{DateTime, Duration, Utc};

///
/// Tracks the last successful password change per email.
///
/// A successful reset puts the email into cooling-down for the configured
/// window - further successful changes are refused until it elapses. Replays
/// of a consumed token never reach this guard; they die at the token check.
///
pub struct ThrottleStore {
    last_success: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl ThrottleStore {
    pub fn new() -> Self {
        ThrottleStore { last_success: Mutex::new(HashMap::new()) }
    }

    pub fn cooling_down(&self, email: &str, now: DateTime<Utc>, window_seconds: u32) -> bool {
        match self.last_success.lock().get(email) {
            Some(last_success) => {
                let elapsed: Duration = now - *last_success;
                elapsed.num_seconds() < window_seconds as i64
            },
            None => false,
        }
    }

    pub fn record_success(&self, email: &str, now: DateTime<Utc>) {
        self.last_success.lock().insert(email.to_string(), now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_an_identity_cools_down_after_a_success() {
        let store = ThrottleStore::new();
        let now = Utc::now();

        assert!(!store.cooling_down("alice@example.com", now, 60));

        store.record_success("alice@example.com", now);
        assert!(store.cooling_down("alice@example.com", now + Duration::seconds(59), 60));
        assert!(!store.cooling_down("alice@example.com", now + Duration::seconds(60), 60));
    }

    #[test]
    fn test_identities_are_throttled_independently() {
        let store = ThrottleStore::new();
        let now = Utc::now();

        store.record_success("alice@example.com", now);
        assert!(!store.cooling_down("bob@example.com", now, 60));
    }
}
