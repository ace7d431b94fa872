use pbkdf2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, Salt};
use pbkdf2::{Pbkdf2, password_hash::SaltString};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use crate::utils::errors::WardenError;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PBKDF2Params {
    pub cost: u32,
    pub dk_len: u32, // Derived key length in bytes.
}

impl Default for PBKDF2Params {
    fn default() -> Self {
        Self {
            cost: 10_000,
            dk_len: 32,
        }
    }
}

impl PBKDF2Params {
    pub fn hash_into_phc(&self, plain_text_password: &str) -> Result<String, WardenError> {
        let salt = SaltString::generate(&mut OsRng);
        let salt = Salt::new(salt.as_str())?;
        let params = pbkdf2::Params {
            rounds: self.cost,
            output_length: self.dk_len as usize,
        };

        // Hash password to PHC string ($pbkdf2-sha256$...)
        Ok(Pbkdf2.hash_password_customized(
            plain_text_password.as_bytes(),
            None,
            None,
            params,
            salt)?.to_string())
    }
}

pub fn validate(phc: &str, plain_text_password: &str) -> Result<bool, WardenError> {
    let parsed_hash = PasswordHash::new(&phc)?;
    Ok(Pbkdf2.verify_password(plain_text_password.as_bytes(), &parsed_hash).is_ok())
}
