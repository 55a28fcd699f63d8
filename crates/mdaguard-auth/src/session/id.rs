//! Session identifier generation.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use mdaguard_core::types::SessionId;

/// Number of random bytes in a session identifier.
const SESSION_ID_BYTES: usize = 32;

/// Generates a fresh session identifier from the operating system CSPRNG.
///
/// 256 bits of entropy, base64url-encoded without padding (43 characters).
pub fn generate() -> SessionId {
    let mut bytes = [0u8; SESSION_ID_BYTES];
    OsRng.fill_bytes(&mut bytes);
    SessionId::new(URL_SAFE_NO_PAD.encode(bytes))
}
