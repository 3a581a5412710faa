//! Session cookie signing.
//!
//! Cookie values have the form `<session-id>.<hex hmac-sha256(session-id)>`.
//! A value whose MAC does not verify is treated as absent, so a client
//! cannot pick or forge another browser's session id.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use lexchat_types::chat::SessionId;

use super::hex_encode;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, thiserror::Error)]
#[error("invalid signing key: {0}")]
pub struct SignerError(String);

/// HMAC-SHA256 signer keyed by the server's secret key.
#[derive(Clone)]
pub struct SessionSigner {
    mac: HmacSha256,
}

impl SessionSigner {
    pub fn new(secret: &[u8]) -> Result<Self, SignerError> {
        let mac = HmacSha256::new_from_slice(secret).map_err(|e| SignerError(e.to_string()))?;
        Ok(Self { mac })
    }

    /// Produce the signed cookie value for a session id.
    pub fn sign(&self, id: &SessionId) -> String {
        let mut mac = self.mac.clone();
        mac.update(id.as_str().as_bytes());
        let tag = hex_encode(&mac.finalize().into_bytes());
        format!("{}.{}", id.as_str(), tag)
    }

    /// Recover the session id from a signed value, or `None` if the value is
    /// malformed or its signature does not match.
    pub fn verify(&self, value: &str) -> Option<SessionId> {
        let (id, tag_hex) = value.rsplit_once('.')?;
        if id.is_empty() {
            return None;
        }
        let tag = hex_decode(tag_hex)?;

        let mut mac = self.mac.clone();
        mac.update(id.as_bytes());
        // Constant-time comparison via `verify_slice`.
        mac.verify_slice(&tag).ok()?;
        Some(SessionId::from(id))
    }
}

fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 || !hex.is_ascii() {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}
