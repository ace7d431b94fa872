pub mod algorithm;
pub mod credential;
pub mod events;
pub mod policy;
pub mod signer;
pub mod token;
