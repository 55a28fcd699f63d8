//! Argon2id password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use mdaguard_core::config::PasswordConfig;
use mdaguard_core::error::AppError;
use mdaguard_core::traits::CredentialHasher;

/// Hashes and verifies passwords using Argon2id with configurable cost.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    /// Cost parameters used for new hashes.
    params: Params,
}

impl Argon2Hasher {
    /// Creates a hasher from password configuration.
    pub fn new(config: &PasswordConfig) -> Result<Self, AppError> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| AppError::configuration(format!("Invalid Argon2 parameters: {e}")))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, digest: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(digest)
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

        // Cost parameters are read back from the digest itself.
        match self.argon2().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }
}
