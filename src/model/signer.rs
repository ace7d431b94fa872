use rand::RngCore;
use sha2::Sha256;
use hmac::{Hmac, Mac};
use crate::utils::errors::{ErrorCode, WardenError};

type HmacSha256 = Hmac<Sha256>;

///
/// Signs and verifies reset-link parameters with a server-side secret.
///
/// The signature covers email, token and expiry together, so none of them can
/// be swapped or extended by the caller. Verification is constant-time and
/// happens before any token lookup - a forged link never probes the store.
///
pub struct LinkSigner {
    key: Vec<u8>,
}

impl LinkSigner {
    pub fn new(key: &[u8]) -> Self {
        LinkSigner { key: key.to_vec() }
    }

    ///
    /// A process-local random key. Fine for a single instance - links signed
    /// by one instance cannot be verified by another.
    ///
    pub fn random() -> Self {
        let mut key = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut key);
        LinkSigner { key: key.to_vec() }
    }

    pub fn sign(&self, email: &str, token: &str, expires_at: u64) -> String {
        let mac = self.mac(email, token, expires_at);
        base64::encode_config(mac.finalize().into_bytes(), base64::URL_SAFE_NO_PAD)
    }

    pub fn verify(&self, email: &str, token: &str, expires_at: u64, signature: &str) -> Result<(), WardenError> {
        let presented = base64::decode_config(signature, base64::URL_SAFE_NO_PAD)
            .map_err(|_| ErrorCode::SignatureInvalid.with_msg("The reset link is not correctly signed"))?;

        self.mac(email, token, expires_at)
            .verify_slice(&presented)
            .map_err(|_| ErrorCode::SignatureInvalid.with_msg("The reset link is not correctly signed"))
    }

    fn mac(&self, email: &str, token: &str, expires_at: u64) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(&self.key).expect("HMAC can take a key of any size");
        mac.update(format!("{}|{}|{}", email, token, expires_at).as_bytes());
        mac
    }
}
