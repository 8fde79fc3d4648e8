//! Contact form messages.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::validation::{RequiredFields, field_error, message_long_enough, missing_fields_error};
use super::{EmailAddress, Error};

/// Raw contact form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// Reasons a contact message is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactValidationError {
    #[error("All fields are required")]
    MissingFields { fields: Vec<&'static str> },
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Message must be at least 10 characters long")]
    MessageTooShort,
}

impl From<ContactValidationError> for Error {
    fn from(value: ContactValidationError) -> Self {
        let message = value.to_string();
        match value {
            ContactValidationError::MissingFields { fields } => {
                missing_fields_error(message, &fields)
            }
            ContactValidationError::InvalidEmail => field_error(message, "email", "invalid_email"),
            ContactValidationError::MessageTooShort => {
                field_error(message, "message", "message_too_short")
            }
        }
    }
}

/// A stored contact message. Write-once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: EmailAddress,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ContactMessage {
    /// Validate a contact form submitted at `created_at`.
    pub fn from_form(
        form: ContactForm,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ContactValidationError> {
        let mut fields = RequiredFields::new();
        let name = fields.text("name", form.name);
        let email = fields.text("email", form.email);
        let message = fields.text("message", form.message);
        fields
            .finish()
            .map_err(|fields| ContactValidationError::MissingFields { fields })?;

        let email = EmailAddress::as_submitted(email)
            .map_err(|_| ContactValidationError::InvalidEmail)?;
        if !message_long_enough(&message) {
            return Err(ContactValidationError::MessageTooShort);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            email,
            message,
            created_at,
        })
    }
}
