use std::str::FromStr;
use serde::{Deserialize, Serialize};
use super::algorithm::{self, Algorithm};
use crate::utils::config::Configuration;
use crate::utils::errors::{ErrorCode, WardenError};

///
/// The rules a replacement password must satisfy, plus the algorithm used to
/// hash it.
///
/// Validation is a pure function over the submitted form fields - it touches
/// no store and causes no mutation, so a failing submission leaves the world
/// exactly as it was.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PasswordPolicy {
    pub min_length: u32,
    pub max_length: u32,
    pub algorithm: Algorithm,
}

impl PasswordPolicy {
    pub fn from_config(config: &Configuration) -> Result<Self, WardenError> {
        Ok(PasswordPolicy {
            min_length: config.min_password_length,
            max_length: config.max_password_length,
            algorithm: Algorithm::from_str(&config.hash_algorithm)?,
        })
    }

    ///
    /// Check the submitted password and confirmation. The first failing rule
    /// is returned, scoped to the field it concerns.
    ///
    pub fn validate_reset(&self, new_password: &str, confirmation: &str) -> Result<(), WardenError> {

        if new_password.is_empty() {
            return Err(ErrorCode::PasswordRequired
                .with_msg("the password field is required"))
        }

        if confirmation.is_empty() {
            return Err(ErrorCode::ConfirmationRequired
                .with_msg("the passwordConfirmation field is required"))
        }

        // Exact match - no trimming, no case-folding.
        if new_password != confirmation {
            return Err(ErrorCode::PasswordMismatch
                .with_msg("the password and passwordConfirmation fields must be the same"))
        }

        if new_password.len() < self.min_length as usize {
            return Err(ErrorCode::PasswordTooShort
                .with_msg(&format!("passwords must be at least {} characters", self.min_length)))
        }

        if new_password.len() > self.max_length as usize {
            return Err(ErrorCode::PasswordTooLong
                .with_msg(&format!("passwords may not be more than {} characters", self.max_length)))
        }

        Ok(())
    }

    ///
    /// Hash the password into a PHC string with the configured algorithm.
    ///
    /// ref: https://github.com/P-H-C/phc-string-format/blob/master/phc-sf-spec.md
    ///
    pub fn hash_into_phc(&self, plain_text_password: &str) -> Result<String, WardenError> {
        algorithm::hash_into_phc(self.algorithm, plain_text_password)
    }
}
