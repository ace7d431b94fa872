use rand::Rng;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

///
/// A single-use reset token issued for an identity.
///
/// At most one of these is live per email - issuing a new one replaces the
/// previous. The value is stored as issued; it is compared in constant time
/// and destroyed on consumption or expiry.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ResetToken {
    pub email: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ResetToken {
    pub fn issue(email: &str, length: u32, ttl_seconds: u32, now: DateTime<Utc>) -> Self {
        ResetToken {
            email: email.to_string(),
            token: generate_token(length as usize),
            created_at: now,
            expires_at: now + Duration::seconds(ttl_seconds as i64),
        }
    }

    pub fn expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    ///
    /// Does the presented value match this token? Constant-time.
    ///
    pub fn matches(&self, presented: &str) -> bool {
        constant_time_eq(self.token.as_bytes(), presented.as_bytes())
    }
}

///
/// The outcome of checking a presented token against the store.
///
/// Invalid and Expired are distinguished internally (for logging) but both
/// surface to the caller as the same generic rejection.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TokenCheck {
    Valid,
    Invalid,
    Expired,
}

///
/// Generate a random token from the charset - 43 chars gives over 256 bits
/// of entropy.
///
fn generate_token(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

///
/// Constant-time byte comparison - the comparison must not leak how much of
/// a guessed token was correct.
///
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
