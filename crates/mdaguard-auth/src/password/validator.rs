//! Password policy enforcement for new credentials.

use mdaguard_core::config::PasswordConfig;
use mdaguard_core::error::AppError;

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length in characters.
    min_length: usize,
    /// Minimum zxcvbn score (0–4), if the entropy check is enabled.
    min_strength: Option<u8>,
}

impl PasswordValidator {
    /// Creates a new validator from password configuration.
    pub fn new(config: &PasswordConfig) -> Self {
        Self {
            min_length: config.min_length.max(1),
            min_strength: config.min_strength,
        }
    }

    /// Validates a password against all configured policies.
    ///
    /// Returns `Ok(())` if the password meets all requirements,
    /// or an error describing the first violation found. The password
    /// itself never appears in the error.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if let Some(min_strength) = self.min_strength {
            let estimate = zxcvbn::zxcvbn(password, &[]);
            if estimate.score() < score_from_level(min_strength) {
                return Err(AppError::validation(
                    "Password is too weak. Please use a stronger password with more entropy.",
                ));
            }
        }

        Ok(())
    }
}

impl Default for PasswordValidator {
    fn default() -> Self {
        Self::new(&PasswordConfig::default())
    }
}

fn score_from_level(level: u8) -> zxcvbn::Score {
    match level {
        0 => zxcvbn::Score::Zero,
        1 => zxcvbn::Score::One,
        2 => zxcvbn::Score::Two,
        3 => zxcvbn::Score::Three,
        _ => zxcvbn::Score::Four,
    }
}
