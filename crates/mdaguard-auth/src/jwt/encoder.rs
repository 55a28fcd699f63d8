//! HS256 token signing.

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

use mdaguard_core::error::AppError;

use super::claims::SignedPayload;

/// Signs payloads with a symmetric HMAC-SHA256 key.
#[derive(Clone)]
pub struct TokenEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Header with the fixed algorithm identifier.
    header: Header,
}

impl std::fmt::Debug for TokenEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEncoder")
            .field("header", &self.header)
            .finish_non_exhaustive()
    }
}

impl TokenEncoder {
    /// Creates an encoder for `secret`.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            header: Header::new(Algorithm::HS256),
        }
    }

    /// Serializes and signs a payload into compact `header.payload.signature` form.
    pub fn encode(&self, payload: &SignedPayload) -> Result<String, AppError> {
        encode(&self.header, payload, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }
}
