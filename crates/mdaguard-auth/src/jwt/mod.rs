//! Signed token issuance and verification (HS256 JWT).

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod issuer;

pub use claims::{Claims, VerifiedToken};
pub use decoder::{TokenDecoder, TokenRejection};
pub use encoder::TokenEncoder;
pub use issuer::TokenIssuer;
