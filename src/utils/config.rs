use std::fmt::Write;
use std::env::VarError;
use config::ConfigError;
use serde::{Deserialize, Serialize};
use super::errors::WardenError;

///
/// The service configuration - initialised at start-up.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Configuration {
    pub address: String,                // The address and port to host the server on.
    pub token_ttl_seconds: u32,         // How long an issued reset token (and the signed link) lives.
    pub token_length: u32,              // Length of the generated reset token in characters.
    pub throttle_seconds: u32,          // Cooling-down window after a successful password change.
    pub min_password_length: u32,       // Replacement password policy.
    pub max_password_length: u32,
    pub hash_algorithm: String,         // argon2, bcrypt or pbkdf2.
    pub signing_key: Option<String>,    // The link-signing secret. Generated at start-up if absent.
    pub tls: bool,                      // Serve with TLS using certs/cert.pem and certs/key.pem.
}

impl Configuration {
    ///
    /// Load the service's configuration.
    ///
    pub fn from_env() -> Result<Configuration, ConfigError> {
        let mut cfg = config::Config::default();

        // Merge any environment variables with the same name as the struct fields.
        cfg.merge(config::Environment::new())?;

        // Set defaults for settings that were not specified.
        cfg.set_default("address", "[::1]:50052")?;
        cfg.set_default("token_ttl_seconds", 3600)?;
        cfg.set_default("token_length", 43)?;
        cfg.set_default("throttle_seconds", 60)?;
        cfg.set_default("min_password_length", 8)?;
        cfg.set_default("max_password_length", 128)?;
        cfg.set_default("hash_algorithm", "argon2")?;
        cfg.set_default("signing_key", None::<String>)?;
        cfg.set_default("tls", false)?;

        let config: Configuration = cfg.try_into()?;

        Ok(config)
    }

    ///
    /// Pretty-print the config.
    ///
    pub fn fmt_console(&self) -> Result<String, WardenError> {
        // Serialise to JSON so we have fields to iterate.
        let values = serde_json::to_value(&self)?;

        // Turn into a hashmap.
        let values = values.as_object().expect("No config props");

        // Sort by keys.
        let mut sorted: Vec<_> = values.iter().collect();
        sorted.sort_by_key(|a| a.0);

        let mut output = String::new();
        for (k, v) in sorted {
            if k == "signing_key" {
                writeln!(&mut output, "{:>23}: <hidden>", k).unwrap();
                continue;
            }
            writeln!(&mut output, "{:>23}: {}", k, v).unwrap();
        }

        Ok(output)
    }
}

///
/// If the specified environment variable is not set for this process, set it to the default value specified.
///
pub fn default_env(key: &str, value: &str) {
    if let Err(VarError::NotPresent) = std::env::var(key) {
        std::env::set_var(key, value);
    }
}
