//! HS256 token signature and algorithm checking.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use thiserror::Error;

use super::claims::SignedPayload;

/// Why a token was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenRejection {
    /// Not a well-formed compact token, or the payload does not parse.
    #[error("token is malformed")]
    Malformed,
    /// The header names an algorithm other than HS256.
    #[error("token algorithm is not accepted")]
    AlgorithmMismatch,
    /// The signature does not match the header and payload under the current secret.
    #[error("token signature is invalid")]
    BadSignature,
    /// The token is past its expiry.
    #[error("token has expired")]
    Expired,
}

/// Checks signatures and algorithm identifiers.
///
/// Expiry is not checked here: the issuer compares `exp` against its own
/// clock so the boundary convention matches issuance exactly.
#[derive(Clone)]
pub struct TokenDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for TokenDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDecoder")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl TokenDecoder {
    /// Creates a decoder for `secret`.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Verifies the signature and algorithm and returns the payload.
    pub fn decode(&self, token: &str) -> Result<SignedPayload, TokenRejection> {
        decode::<SignedPayload>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::InvalidSignature => TokenRejection::BadSignature,
                JwtErrorKind::InvalidAlgorithm | JwtErrorKind::InvalidAlgorithmName => {
                    TokenRejection::AlgorithmMismatch
                }
                JwtErrorKind::ExpiredSignature => TokenRejection::Expired,
                _ => TokenRejection::Malformed,
            })
    }
}
