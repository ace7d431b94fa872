use parking_lot::Mutex;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use crate::model::credential::Credential;

///
/// Holds the hashed credentials, keyed by email. Written only by the reset
/// pipeline after a winning token consume.
///
pub struct CredentialStore {
    credentials: Mutex<HashMap<String, Credential>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        CredentialStore { credentials: Mutex::new(HashMap::new()) }
    }

    ///
    /// Create or update the credential for the email.
    ///
    pub fn upsert(&self, email: &str, phc: &str, now: DateTime<Utc>) {
        self.credentials.lock().insert(email.to_string(), Credential {
            email: email.to_string(),
            phc: phc.to_string(),
            changed_on: now,
        });
    }

    pub fn load(&self, email: &str) -> Option<Credential> {
        self.credentials.lock().get(email).cloned()
    }
}
