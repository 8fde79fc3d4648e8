//! Authentication primitives: registration input, login credentials, and
//! password material.
//!
//! Inbound adapters hand raw, possibly missing, field values to the
//! constructors here; everything past this module works with validated types.

use std::fmt;

use serde_json::json;
use zeroize::Zeroizing;

use super::validation::{RequiredFields, missing_fields_error};
use super::{EmailAddress, Error, FullName};

/// Minimum password length, in characters.
pub const PASSWORD_MIN_CHARS: usize = 6;

/// Plaintext password held only as long as hashing or verification needs it.
///
/// The buffer is wiped on drop and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct PlainPassword(Zeroizing<String>);

impl PlainPassword {
    /// Wrap caller-provided password text verbatim.
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    /// Borrow the plaintext for hashing.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlainPassword(..)")
    }
}

/// Salted one-way password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap a PHC string produced by a hasher or read from storage.
    pub fn new(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// Borrow the PHC string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

/// Reasons a registration request is rejected before touching storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    #[error("All fields are required")]
    MissingFields { fields: Vec<&'static str> },
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },
}

impl From<RegistrationValidationError> for Error {
    fn from(value: RegistrationValidationError) -> Self {
        let message = value.to_string();
        match value {
            RegistrationValidationError::MissingFields { fields } => {
                missing_fields_error(message, &fields)
            }
            RegistrationValidationError::InvalidEmail => Self::invalid_request(message)
                .with_details(json!({ "field": "email", "code": "invalid_email" })),
            RegistrationValidationError::PasswordTooShort { min } => {
                Self::invalid_request(message).with_details(json!({
                    "field": "password",
                    "code": "password_too_short",
                    "min": min,
                }))
            }
        }
    }
}

/// Validated registration request.
///
/// # Examples
/// ```
/// use siptalk::domain::Registration;
///
/// let registration = Registration::try_from_parts(
///     Some("Jane Doe".into()),
///     Some("Jane@Example.com".into()),
///     Some("secret1".into()),
/// )
/// .expect("valid registration");
/// assert_eq!(registration.email().as_str(), "jane@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    full_name: FullName,
    email: EmailAddress,
    password: PlainPassword,
}

impl Registration {
    /// Validate raw registration fields in the order users see them fail:
    /// presence, email format, then password length.
    pub fn try_from_parts(
        full_name: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<Self, RegistrationValidationError> {
        let mut fields = RequiredFields::new();
        let full_name = fields.text("full_name", full_name);
        let email = fields.text("email", email);
        let password = PlainPassword::new(fields.raw("password", password));
        fields
            .finish()
            .map_err(|fields| RegistrationValidationError::MissingFields { fields })?;

        let email =
            EmailAddress::new(email).map_err(|_| RegistrationValidationError::InvalidEmail)?;
        if password.char_count() < PASSWORD_MIN_CHARS {
            return Err(RegistrationValidationError::PasswordTooShort {
                min: PASSWORD_MIN_CHARS,
            });
        }
        let full_name = FullName::new(full_name).map_err(|_| {
            RegistrationValidationError::MissingFields {
                fields: vec!["full_name"],
            }
        })?;

        Ok(Self {
            full_name,
            email,
            password,
        })
    }

    /// Registrant's full name.
    #[must_use]
    pub const fn full_name(&self) -> &FullName {
        &self.full_name
    }

    /// Normalised email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plaintext password awaiting hashing.
    #[must_use]
    pub const fn password(&self) -> &PlainPassword {
        &self.password
    }
}

/// Reasons a login request is rejected before touching storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    #[error("Email and password are required")]
    MissingFields { fields: Vec<&'static str> },
    #[error("Invalid email format")]
    InvalidEmail,
}

impl From<LoginValidationError> for Error {
    fn from(value: LoginValidationError) -> Self {
        let message = value.to_string();
        match value {
            LoginValidationError::MissingFields { fields } => {
                missing_fields_error(message, &fields)
            }
            LoginValidationError::InvalidEmail => Self::invalid_request(message)
                .with_details(json!({ "field": "email", "code": "invalid_email" })),
        }
    }
}

/// Validated login credentials used by the auth facade.
///
/// # Examples
/// ```
/// use siptalk::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(
///     Some(" jane@example.com ".into()),
///     Some("secret1".into()),
/// )
/// .expect("valid credentials");
/// assert_eq!(creds.email().as_str(), "jane@example.com");
/// assert_eq!(creds.password().expose(), "secret1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: PlainPassword,
}

impl LoginCredentials {
    /// Validate raw login fields. The password keeps caller whitespace.
    pub fn try_from_parts(
        email: Option<String>,
        password: Option<String>,
    ) -> Result<Self, LoginValidationError> {
        let mut fields = RequiredFields::new();
        let email = fields.text("email", email);
        let password = PlainPassword::new(fields.raw("password", password));
        fields
            .finish()
            .map_err(|fields| LoginValidationError::MissingFields { fields })?;

        let email = EmailAddress::new(email).map_err(|_| LoginValidationError::InvalidEmail)?;
        Ok(Self { email, password })
    }

    /// Normalised email used for the credential lookup.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plaintext password to verify.
    #[must_use]
    pub const fn password(&self) -> &PlainPassword {
        &self.password
    }
}
