//! Session-cookie signing and secret generation.

pub mod signer;

pub use signer::SessionSigner;

use rand::RngCore;

/// Lowercase hex encoding.
pub(crate) fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// A fresh 32-byte key from the OS RNG, hex encoded.
pub fn generate_secret_key() -> String {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex_encode(&bytes)
}
