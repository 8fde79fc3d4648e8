//! Customer feedback entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::validation::{RequiredFields, field_error, message_long_enough, missing_fields_error};
use super::{EmailAddress, Error};

/// Number of entries returned by the feedback listing.
pub const FEEDBACK_LIST_LIMIT: usize = 50;

/// Star rating between 1 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "i64", into = "i16")]
#[schema(value_type = i16, example = 5)]
pub struct Rating(i16);

impl Rating {
    /// Lowest rating.
    pub const MIN: i16 = 1;
    /// Highest rating.
    pub const MAX: i16 = 5;

    /// Validate a raw rating.
    pub fn new(value: i64) -> Result<Self, FeedbackValidationError> {
        i16::try_from(value)
            .ok()
            .filter(|rating| (Self::MIN..=Self::MAX).contains(rating))
            .map(Self)
            .ok_or(FeedbackValidationError::RatingOutOfRange { rating: value })
    }

    /// Numeric value.
    #[must_use]
    pub const fn get(self) -> i16 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = FeedbackValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for i16 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

/// Raw feedback form values. A missing rating counts as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub rating: Option<i64>,
    pub message: Option<String>,
}

/// Reasons a feedback entry is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedbackValidationError {
    #[error("All fields are required")]
    MissingFields { fields: Vec<&'static str> },
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Rating must be between 1 and 5")]
    RatingOutOfRange { rating: i64 },
    #[error("Feedback message must be at least 10 characters long")]
    MessageTooShort,
}

impl From<FeedbackValidationError> for Error {
    fn from(value: FeedbackValidationError) -> Self {
        let message = value.to_string();
        match value {
            FeedbackValidationError::MissingFields { fields } => {
                missing_fields_error(message, &fields)
            }
            FeedbackValidationError::InvalidEmail => {
                field_error(message, "email", "invalid_email")
            }
            FeedbackValidationError::RatingOutOfRange { .. } => {
                field_error(message, "rating", "rating_out_of_range")
            }
            FeedbackValidationError::MessageTooShort => {
                field_error(message, "message", "message_too_short")
            }
        }
    }
}

/// A stored feedback entry. Write-once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackEntry {
    pub id: Uuid,
    pub name: String,
    pub email: EmailAddress,
    pub rating: Rating,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl FeedbackEntry {
    /// Validate a feedback form submitted at `created_at`.
    pub fn from_form(
        form: FeedbackForm,
        created_at: DateTime<Utc>,
    ) -> Result<Self, FeedbackValidationError> {
        let mut fields = RequiredFields::new();
        let name = fields.text("name", form.name);
        let email = fields.text("email", form.email);
        let message = fields.text("message", form.message);
        fields
            .finish()
            .map_err(|fields| FeedbackValidationError::MissingFields { fields })?;

        let email = EmailAddress::as_submitted(email)
            .map_err(|_| FeedbackValidationError::InvalidEmail)?;
        let rating = Rating::new(form.rating.unwrap_or(0))?;
        if !message_long_enough(&message) {
            return Err(FeedbackValidationError::MessageTooShort);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            email,
            rating,
            message,
            created_at,
        })
    }
}
