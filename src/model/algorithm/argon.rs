use rand_core::OsRng;
use std::convert::TryFrom;
use serde::{Deserialize, Serialize};
use crate::utils::errors::WardenError;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ArgonParams {
    pub parallelism: u32,
    pub memory_size_kb: u32,
    pub iterations: u32,
    pub version: u32,
}

impl Default for ArgonParams {
    fn default() -> Self {
        ArgonParams {
            parallelism: 1,
            memory_size_kb: 1024 * 16,
            iterations: 1,
            version: 19,
        }
    }
}

impl ArgonParams {
    pub fn hash_into_phc(&self, plain_text_password: &str) -> Result<String, WardenError> {
        let password = plain_text_password.as_bytes();
        let salt = argon2::password_hash::SaltString::generate(&mut OsRng);

        let argon2 = argon2::Argon2::new(
            argon2::Algorithm::default(),
            argon2::Version::try_from(self.version)?,
            argon2::Params::new(self.memory_size_kb, self.iterations, self.parallelism, None)?);

        // Hash password to PHC string ($argon2id$v=19$...)
        Ok(argon2::PasswordHasher::hash_password(&argon2, password, salt.as_str())?.to_string())
    }
}

pub fn validate(phc: &str, plain_text_password: &str) -> Result<bool, WardenError> {
    let parsed_hash = argon2::PasswordHash::new(&phc)?;
    match argon2::PasswordVerifier::verify_password(&argon2::Argon2::default(), plain_text_password.as_bytes(), &parsed_hash) {
        Ok(_)  => Ok(true),
        Err(_) => Ok(false),
    }
}
