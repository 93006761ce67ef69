//! Authentication inputs: sign-in credentials and registration details.
//!
//! Handlers build these from raw strings before calling the auth service, so
//! the service only ever sees trimmed, non-empty values.

use super::{DisplayName, EmailAddress, Password, UserValidationError, Username};

/// Validation failures for sign-in and registration input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    #[error(transparent)]
    User(#[from] UserValidationError),
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("confirm_password must not be empty")]
    EmptyConfirmPassword,
}

impl CredentialsValidationError {
    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::User(UserValidationError::EmptyDisplayName) => "name",
            Self::User(UserValidationError::EmptyEmail) => "email",
            Self::User(
                UserValidationError::EmptyUsername
                | UserValidationError::EmptyId
                | UserValidationError::InvalidId,
            ) => "username",
            Self::EmptyPassword => "password",
            Self::EmptyConfirmPassword => "confirm_password",
        }
    }
}

fn non_empty_password(
    raw: &str,
    err: CredentialsValidationError,
) -> Result<Password, CredentialsValidationError> {
    if raw.is_empty() {
        return Err(err);
    }
    Ok(Password::new(raw))
}

/// Validated sign-in credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use request_tracker::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ann ", "pw").expect("valid");
/// assert_eq!(creds.username().as_ref(), "ann");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Password,
}

impl LoginCredentials {
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            password: non_empty_password(password, CredentialsValidationError::EmptyPassword)?,
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Raw registration fields as received from a caller.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationInput<'a> {
    pub name: &'a str,
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
}

/// Validated registration request.
///
/// Matching of `password` and `confirm_password` is left to the auth
/// service, which checks username and email availability first.
#[derive(Debug, Clone)]
pub struct Registration {
    display_name: DisplayName,
    username: Username,
    email: EmailAddress,
    password: Password,
    confirm_password: Password,
}

impl Registration {
    pub fn try_from_input(
        input: RegistrationInput<'_>,
    ) -> Result<Self, CredentialsValidationError> {
        Ok(Self {
            display_name: DisplayName::new(input.name)?,
            username: Username::new(input.username)?,
            email: EmailAddress::new(input.email)?,
            password: non_empty_password(
                input.password,
                CredentialsValidationError::EmptyPassword,
            )?,
            confirm_password: non_empty_password(
                input.confirm_password,
                CredentialsValidationError::EmptyConfirmPassword,
            )?,
        })
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

    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Whether the confirmation matches the password exactly.
    pub fn passwords_match(&self) -> bool {
        self.password == self.confirm_password
    }
}
