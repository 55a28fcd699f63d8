//! Token issuer: the only way to obtain signing and verification over a
//! shared secret.

use std::sync::Arc;

use chrono::{DateTime, Duration};
use serde_json::Value;
use tracing::debug;

use mdaguard_core::error::AppError;
use mdaguard_core::result::AppResult;
use mdaguard_core::traits::Clock;

use super::claims::{Claims, RESERVED_CLAIMS, SignedPayload, VerifiedToken};
use super::decoder::{TokenDecoder, TokenRejection};
use super::encoder::TokenEncoder;

/// Issues and verifies self-contained signed tokens. Tokens are never
/// stored; the caller holds them.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    encoder: TokenEncoder,
    decoder: TokenDecoder,
    /// Time source for `iat`/`exp` and the expiry check.
    clock: Arc<dyn Clock>,
    /// Lifetime used by [`TokenIssuer::issue`].
    default_ttl: Duration,
}

impl TokenIssuer {
    /// Creates an issuer signing with `secret`.
    ///
    /// Fails with a `Configuration` error if the secret is empty or blank.
    pub fn new(secret: &str, clock: Arc<dyn Clock>, default_ttl: Duration) -> AppResult<Self> {
        if secret.trim().is_empty() {
            return Err(AppError::configuration("Token secret key is required"));
        }

        Ok(Self {
            encoder: TokenEncoder::new(secret.as_bytes()),
            decoder: TokenDecoder::new(secret.as_bytes()),
            clock,
            default_ttl,
        })
    }

    /// Lifetime applied by [`TokenIssuer::issue`].
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Issues a token carrying `claims` with the default lifetime.
    pub fn issue(&self, claims: Claims) -> AppResult<String> {
        self.issue_with_ttl(claims, self.default_ttl)
    }

    /// Issues a token from a JSON value, which must be an object.
    pub fn issue_value(&self, claims: Value) -> AppResult<String> {
        match claims {
            Value::Object(map) => self.issue(map),
            other => Err(AppError::validation(format!(
                "Token claims must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Issues a token carrying `claims` that expires `ttl` from now.
    ///
    /// `iat` and `exp` are written by the issuer in whole seconds; a
    /// zero `ttl` yields a token that is already expired.
    pub fn issue_with_ttl(&self, claims: Claims, ttl: Duration) -> AppResult<String> {
        if let Some(name) = RESERVED_CLAIMS.iter().find(|name| claims.contains_key(**name)) {
            return Err(AppError::validation(format!(
                "Claim '{name}' is reserved and set by the issuer"
            )));
        }
        if ttl < Duration::zero() {
            return Err(AppError::validation("Token TTL must not be negative"));
        }

        let iat = self.clock.now().timestamp();
        let exp = iat
            .checked_add(ttl.num_seconds())
            .filter(|exp| DateTime::from_timestamp(*exp, 0).is_some())
            .ok_or_else(|| AppError::validation("Token TTL is out of range"))?;

        let token = self.encoder.encode(&SignedPayload { claims, iat, exp })?;
        debug!(iat, exp, "Token issued");
        Ok(token)
    }

    /// Verifies a token and returns its claims, or `None` if it is
    /// malformed, signed with another secret or algorithm, or expired.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        self.inspect(token).ok().map(|verified| verified.claims)
    }

    /// Verifies a token and reports why it was rejected.
    pub fn inspect(&self, token: &str) -> Result<VerifiedToken, TokenRejection> {
        let payload = self.decoder.decode(token).inspect_err(|reason| {
            debug!(reason = %reason, "Token rejected");
        })?;

        // Expired from `exp` onwards, matching the session convention.
        if self.clock.now().timestamp() >= payload.exp {
            debug!(exp = payload.exp, "Token rejected: expired");
            return Err(TokenRejection::Expired);
        }

        Ok(VerifiedToken::from_payload(payload))
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
