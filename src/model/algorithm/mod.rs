pub mod argon;
pub mod bcrypt;
pub mod pbkdf2;

use std::str::FromStr;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use crate::utils::errors::{ErrorCode, WardenError};

#[derive(Clone, Copy, Debug, Deserialize, Display, Serialize, PartialEq)]
pub enum Algorithm {
    Argon,
    BCrypt,
    PBKDF2,
}

///
/// Hash the plain text password into a PHC string using the given algorithm's
/// default parameters.
///
pub fn hash_into_phc(algorithm: Algorithm, plain_text_password: &str) -> Result<String, WardenError> {
    match algorithm {
        Algorithm::Argon  => argon::ArgonParams::default().hash_into_phc(plain_text_password),
        Algorithm::BCrypt => bcrypt::BCryptParams::default().hash_into_phc(plain_text_password),
        Algorithm::PBKDF2 => pbkdf2::PBKDF2Params::default().hash_into_phc(plain_text_password),
    }
}

///
/// Validate if the plain_text_password matches the hashed password provided.
///
/// The algorithm is constructed and used from the PHC string provided.
///
pub fn validate(plain_text_password: &str, phc: &str) -> Result<bool, WardenError> {
    match select(phc)? {
        Algorithm::Argon  => argon::validate(phc, plain_text_password),
        Algorithm::BCrypt => bcrypt::validate(phc, plain_text_password),
        Algorithm::PBKDF2 => pbkdf2::validate(phc, plain_text_password),
    }
}

///
/// Parse the first part of the phc string and return the algorithm.
///
fn select(phc: &str) -> Result<Algorithm, WardenError> {
    let mut split = phc.split("$");
    split.next(); /* Skip first it's blank */

    match split.next() {
        Some(algorithm) => Algorithm::from_str(algorithm),
        None => return Err(ErrorCode::InvalidPHCFormat.with_msg("The PHC is invalid, there's no algorithm")),
    }
}

///
/// Accepts both configuration names (argon2, bcrypt, pbkdf2) and PHC prefixes.
///
impl FromStr for Algorithm {
    type Err = WardenError;

    fn from_str(input: &str) -> Result<Algorithm, Self::Err> {
        match input {
            "argon2"   |
            "argon2i"  |
            "argon2d"  |
            "argon2id" => Ok(Algorithm::Argon),

            "bcrypt" |
            "2a" |
            "2b" |
            "2x" |
            "2y" => Ok(Algorithm::BCrypt),

            "pbkdf2" |
            "pbkdf2-sha256" => Ok(Algorithm::PBKDF2),

            _ => Err(ErrorCode::UnknownAlgorithmVariant.with_msg(&format!("algorithm {} is un-handled", input))),
        }
    }
}
