//! User identity and profile values.
//!
//! Users are created at registration and never mutated afterwards. The
//! stored password is an Argon2 hash and never leaves the domain; adapters
//! render users through their own response types.

use std::fmt;

use uuid::Uuid;

use super::PasswordHash;
use super::text::non_empty_text;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must not be empty")]
    EmptyId,
    #[error("user id must be a valid UUID")]
    InvalidId,
    #[error("name must not be empty")]
    EmptyDisplayName,
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("email must not be empty")]
    EmptyEmail,
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from its string form.
    ///
    /// # Examples
    /// ```
    /// use request_tracker::domain::UserId;
    ///
    /// let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
    /// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    /// assert!(UserId::new("ann").is_err());
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

non_empty_text!(
    /// Human readable name shown alongside the user's records.
    DisplayName,
    UserValidationError::EmptyDisplayName
);
non_empty_text!(
    /// Unique sign-in name. Comparison is exact after trimming.
    Username,
    UserValidationError::EmptyUsername
);
non_empty_text!(
    /// Unique contact address. Only emptiness is checked.
    EmailAddress,
    UserValidationError::EmptyEmail
);

/// Registered user.
///
/// ## Invariants
/// - `username` and `email` are unique across the user store; the store
///   itself does not enforce this, registration does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    display_name: DisplayName,
    username: Username,
    email: EmailAddress,
    password_hash: PasswordHash,
}

/// Validated parts of a [`User`].
#[derive(Debug, Clone)]
pub struct UserParts {
    pub id: UserId,
    pub display_name: DisplayName,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
}

impl User {
    /// Assemble a user from validated parts.
    pub fn new(parts: UserParts) -> Self {
        let UserParts {
            id,
            display_name,
            username,
            email,
            password_hash,
        } = parts;
        Self {
            id,
            display_name,
            username,
            email,
            password_hash,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Stored password hash. Never rendered to callers.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}
