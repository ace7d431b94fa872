use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use crate::utils::errors::WardenError;

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum BCryptVersion {
    TwoA,
    TwoB,
    TwoX,
    TwoY
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BCryptParams {
    pub version: BCryptVersion,
    pub cost: u32
}

pub fn validate(phc: &str, plain_text_password: &str) -> Result<bool, WardenError> {
    bcrypt::verify(plain_text_password, phc).map_err(|e| WardenError::from(e))
}

impl Default for BCryptParams {
    fn default() -> Self {
        Self {
            version: BCryptVersion::TwoB,
            cost: bcrypt::DEFAULT_COST
        }
    }
}

impl BCryptParams {
    pub fn hash_into_phc(&self, plain_text_password: &str) -> Result<String, WardenError> {
        // Use argon to generate a salt.
        let salt = argon2::password_hash::SaltString::generate(&mut OsRng);
        let salt: String = salt.as_str().chars().take(16).collect();
        let hashed = bcrypt::hash_with_salt(plain_text_password, self.cost, salt.as_bytes())?;

        Ok(hashed.format_for_version(self.version.into()))
    }
}

impl From<BCryptVersion> for bcrypt::Version {
    fn from(version: BCryptVersion) -> Self {
        match version {
            BCryptVersion::TwoA => bcrypt::Version::TwoA,
            BCryptVersion::TwoB => bcrypt::Version::TwoB,
            BCryptVersion::TwoX => bcrypt::Version::TwoX,
            BCryptVersion::TwoY => bcrypt::Version::TwoY,
        }
    }
}
