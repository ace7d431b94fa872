use parking_lot::Mutex;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use crate::model::token::{ResetToken, TokenCheck};

///
/// Holds the live reset tokens, keyed by email.
///
/// One token per email: replace() overwrites whatever was there, which is how
/// issuing a new link invalidates the previous one. consume() is the atomic
/// commit point for a reset - a compare-and-delete under the store lock, so
/// concurrent resets presenting the same token see exactly one Valid.
///
pub struct TokenStore {
    tokens: Mutex<HashMap<String, ResetToken>>,
}

impl TokenStore {
    pub fn new() -> Self {
        TokenStore { tokens: Mutex::new(HashMap::new()) }
    }

    ///
    /// Store the token, invalidating any previously issued token for the email.
    ///
    pub fn replace(&self, token: ResetToken) {
        self.tokens.lock().insert(token.email.clone(), token);
    }

    ///
    /// Non-destructive check of a presented token. Unknown email and wrong
    /// token both come back Invalid - the caller must not be able to tell
    /// them apart.
    ///
    pub fn check(&self, email: &str, presented: &str, now: DateTime<Utc>) -> TokenCheck {
        let lock = self.tokens.lock();

        match lock.get(email) {
            Some(token) if !token.matches(presented) => TokenCheck::Invalid,
            Some(token) if token.expired(now) => TokenCheck::Expired,
            Some(_) => TokenCheck::Valid,
            None => TokenCheck::Invalid,
        }
    }

    ///
    /// Compare-and-delete: remove the token only if the presented value still
    /// matches and hasn't expired. Expired entries are purged on the way.
    ///
    pub fn consume(&self, email: &str, presented: &str, now: DateTime<Utc>) -> TokenCheck {
        let mut lock = self.tokens.lock();

        let check = match lock.get(email) {
            Some(token) if !token.matches(presented) => TokenCheck::Invalid,
            Some(token) if token.expired(now) => TokenCheck::Expired,
            Some(_) => TokenCheck::Valid,
            None => TokenCheck::Invalid,
        };

        match check {
            TokenCheck::Valid | TokenCheck::Expired => { lock.remove(email); },
            TokenCheck::Invalid => {},
        }

        check
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token_for(email: &str, now: DateTime<Utc>) -> ResetToken {
        ResetToken::issue(email, 43, 3600, now)
    }

    #[test]
    fn test_a_stored_token_checks_valid() {
        let store = TokenStore::new();
        let now = Utc::now();
        let token = token_for("alice@example.com", now);
        store.replace(token.clone());

        assert_eq!(store.check("alice@example.com", &token.token, now), TokenCheck::Valid);
    }

    #[test]
    fn test_unknown_email_and_wrong_token_are_indistinguishable() {
        let store = TokenStore::new();
        let now = Utc::now();
        let token = token_for("alice@example.com", now);
        store.replace(token.clone());

        let wrong_token = store.check("alice@example.com", "NOT-THE-TOKEN", now);
        let unknown_email = store.check("mallory@example.com", &token.token, now);

        assert_eq!(wrong_token, TokenCheck::Invalid);
        assert_eq!(unknown_email, TokenCheck::Invalid);
    }

    #[test]
    fn test_a_token_never_validates_for_another_identity() {
        let store = TokenStore::new();
        let now = Utc::now();
        let alice = token_for("alice@example.com", now);
        let bob = token_for("bob@example.com", now);
        store.replace(alice.clone());
        store.replace(bob);

        assert_eq!(store.check("bob@example.com", &alice.token, now), TokenCheck::Invalid);
        assert_eq!(store.consume("bob@example.com", &alice.token, now), TokenCheck::Invalid);
    }

    #[test]
    fn test_replace_invalidates_the_previous_token() {
        let store = TokenStore::new();
        let now = Utc::now();
        let first = token_for("alice@example.com", now);
        store.replace(first.clone());

        let second = token_for("alice@example.com", now);
        store.replace(second.clone());

        assert_eq!(store.check("alice@example.com", &first.token, now), TokenCheck::Invalid);
        assert_eq!(store.check("alice@example.com", &second.token, now), TokenCheck::Valid);
    }

    #[test]
    fn test_consume_is_one_shot() {
        let store = TokenStore::new();
        let now = Utc::now();
        let token = token_for("alice@example.com", now);
        store.replace(token.clone());

        assert_eq!(store.consume("alice@example.com", &token.token, now), TokenCheck::Valid);

        // Replays of the consumed token are Invalid, not Expired or throttled.
        assert_eq!(store.consume("alice@example.com", &token.token, now), TokenCheck::Invalid);
        assert_eq!(store.check("alice@example.com", &token.token, now), TokenCheck::Invalid);
    }

    #[test]
    fn test_an_expired_token_cannot_be_consumed() {
        let store = TokenStore::new();
        let now = Utc::now();
        let token = token_for("alice@example.com", now);
        store.replace(token.clone());

        let later = now + Duration::seconds(3601);
        assert_eq!(store.consume("alice@example.com", &token.token, later), TokenCheck::Expired);

        // The expired entry was purged.
        assert_eq!(store.check("alice@example.com", &token.token, later), TokenCheck::Invalid);
    }

    #[test]
    fn test_concurrent_consumers_see_exactly_one_valid() {
        use std::sync::Arc;

        let store = Arc::new(TokenStore::new());
        let now = Utc::now();
        let token = token_for("alice@example.com", now);
        store.replace(token.clone());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                let value = token.token.clone();
                std::thread::spawn(move || store.consume("alice@example.com", &value, now))
            })
            .collect();

        let outcomes: Vec<TokenCheck> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let winners = outcomes.iter().filter(|o| **o == TokenCheck::Valid).count();
        assert_eq!(winners, 1);
    }
}
