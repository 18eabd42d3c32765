//! Password hashing with Argon2.
//!
//! Hashes are stored as PHC strings in `users.password_hash`.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

/// Well-formed hash that never verifies; compared against when a login names
/// an unknown account so both paths do the same work.
pub const UNKNOWN_ACCOUNT_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$ZHVtbXlzYWx0MTIzNDU2$kvBtyUeiH1A7i9YWsoDEAtXu465eN7nDBgDwEL+HAbI";

/// Stored password hash.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

impl Password {
    /// Hash a plain text password after checking the minimum length.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if plain_text.chars().count() < MIN_PASSWORD_LENGTH as usize {
            return Err(AppError::validation(format!(
                "La contraseña debe tener al menos {} caracteres",
                MIN_PASSWORD_LENGTH
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;

        Ok(Self(hash.to_string()))
    }

    /// Wrap a hash loaded from the database.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Check a plain text password. Malformed hashes never verify.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.0) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!("Stored password hash is not a valid PHC string: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_round_trip() {
        let password = Password::new("contraseña-segura").unwrap();
        assert!(password.verify("contraseña-segura"));
        assert!(!password.verify("otra-contraseña"));

        let restored = Password::from_hash(password.as_str());
        assert!(restored.verify("contraseña-segura"));
    }

    #[test]
    fn test_salted_hashes_differ() {
        let first = Password::new("SamePassword123").unwrap();
        let second = Password::new("SamePassword123").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_too_short_is_rejected() {
        assert!(matches!(
            Password::new("corta"),
            Err(AppError::Validation(_))
        ));
        assert!(Password::new("12345678").is_ok());
    }

    #[test]
    fn test_unknown_account_hash_never_verifies() {
        let dummy = Password::from_hash(UNKNOWN_ACCOUNT_HASH);
        assert!(!dummy.verify(""));
        assert!(!dummy.verify("password123"));
    }

    #[test]
    fn test_debug_is_redacted() {
        let password = Password::new("SecurePassword1").unwrap();
        assert_eq!(format!("{:?}", password), "Password([REDACTED])");
    }
}
