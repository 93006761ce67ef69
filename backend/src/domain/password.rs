//! Password hashing and verification.
//!
//! Passwords are hashed with Argon2id using the crate defaults and stored as
//! PHC strings, so the salt and parameters travel with the hash.

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash as PhcHash, PasswordHasher, PasswordVerifier, SaltString,
};
use rand::rngs::OsRng;
use zeroize::Zeroizing;

/// Errors raised while hashing or parsing stored hashes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    #[error("password hashing failed: {message}")]
    Hashing { message: String },
    #[error("stored password hash is malformed: {message}")]
    Malformed { message: String },
}

/// Plain-text password held only for the duration of a request.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Argon2 PHC string for a stored password.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash `password` with a fresh random salt.
    ///
    /// # Examples
    /// ```
    /// use request_tracker::domain::{Password, PasswordHash};
    ///
    /// let hash = PasswordHash::hash(&Password::new("hunter2")).expect("hash");
    /// assert!(hash.verify(&Password::new("hunter2")).expect("verify"));
    /// assert!(!hash.verify(&Password::new("hunter3")).expect("verify"));
    /// ```
    pub fn hash(password: &Password) -> Result<Self, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.expose().as_bytes(), &salt)
            .map(|hash| Self(hash.to_string()))
            .map_err(|err| PasswordHashError::Hashing {
                message: err.to_string(),
            })
    }

    /// Check `password` against the stored hash.
    ///
    /// A mismatch is `Ok(false)`; only a corrupt stored hash is an error.
    pub fn verify(&self, password: &Password) -> Result<bool, PasswordHashError> {
        let parsed = PhcHash::new(&self.0).map_err(|err| PasswordHashError::Malformed {
            message: err.to_string(),
        })?;
        match Argon2::default().verify_password(password.expose().as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::Malformed {
                message: err.to_string(),
            }),
        }
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn hashes_are_salted() {
        let password = Password::new("correct horse battery staple");
        let first = PasswordHash::hash(&password).expect("hash");
        let second = PasswordHash::hash(&password).expect("hash");
        assert_ne!(first, second);
        assert!(first.verify(&password).expect("verify"));
        assert!(second.verify(&password).expect("verify"));
    }

    #[rstest]
    fn wrong_password_does_not_verify() {
        let hash = PasswordHash::hash(&Password::new("secret")).expect("hash");
        assert!(!hash.verify(&Password::new("Secret")).expect("verify"));
    }

    #[rstest]
    fn malformed_hash_is_an_error() {
        let hash = PasswordHash("plain-text".to_owned());
        assert!(matches!(
            hash.verify(&Password::new("plain-text")),
            Err(PasswordHashError::Malformed { .. })
        ));
    }

    #[rstest]
    fn debug_output_is_redacted() {
        assert_eq!(format!("{:?}", Password::new("secret")), "Password(***)");
    }
}
