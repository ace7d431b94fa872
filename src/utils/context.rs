use parking_lot::RwLock;
use chrono::{DateTime, Utc};
use crate::model::{events::PasswordChanged, policy::PasswordPolicy, signer::LinkSigner};
use crate::store::{credential::CredentialStore, throttle::ThrottleStore, token::TokenStore};
use crate::utils::{config::Configuration, errors::WardenError, events::EventBus, time_provider::TimeProvider};

///
/// The context is available to all gRPC service endpoints and gives them access
/// to the stores, signer, event bus, config, etc.
///
/// Nothing here is ambient or global - every endpoint gets handed this
/// explicitly.
///
pub struct ServiceContext {
    config: Configuration,
    policy: PasswordPolicy,
    signer: LinkSigner,
    tokens: TokenStore,
    credentials: CredentialStore,
    throttle: ThrottleStore,
    events: EventBus,
    time_provider: RwLock<TimeProvider>,
}

impl ServiceContext {
    pub fn new(config: Configuration) -> Result<Self, WardenError> {
        let policy = PasswordPolicy::from_config(&config)?;

        let signer = match &config.signing_key {
            Some(key) if !key.is_empty() => LinkSigner::new(key.as_bytes()),
            _ => {
                tracing::warn!("No SIGNING_KEY configured - using a process-local random key. \
                    Links signed by other instances will not verify.");
                LinkSigner::random()
            },
        };

        Ok(ServiceContext {
            config,
            policy,
            signer,
            tokens: TokenStore::new(),
            credentials: CredentialStore::new(),
            throttle: ThrottleStore::new(),
            events: EventBus::new(),
            time_provider: RwLock::new(TimeProvider::default()),
        })
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn policy(&self) -> &PasswordPolicy {
        &self.policy
    }

    pub fn signer(&self) -> &LinkSigner {
        &self.signer
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn throttle(&self) -> &ThrottleStore {
        &self.throttle
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn publish(&self, event: PasswordChanged) {
        self.events.publish(event);
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.time_provider.read().now()
    }

    ///
    /// Set or clear the fixed time.
    ///
    pub fn set_now(&self, now: Option<DateTime<Utc>>) {
        self.time_provider.write().fix(now);
    }
}
