//! Field validation helpers shared by the registration, reservation, and
//! form workflows.

use serde_json::json;

use super::Error;

/// Minimum length, in characters, of contact and feedback messages.
pub const MESSAGE_MIN_CHARS: usize = 10;

/// Collects trimmed required text fields and remembers which were blank.
///
/// Every field is read before the first failure is reported so the error can
/// name all missing fields at once.
#[derive(Debug, Default)]
pub(crate) struct RequiredFields {
    missing: Vec<&'static str>,
}

impl RequiredFields {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Take a field, trimming surrounding whitespace.
    pub(crate) fn text(&mut self, field: &'static str, value: Option<String>) -> String {
        let trimmed = value.as_deref().map(str::trim).unwrap_or_default();
        if trimmed.is_empty() {
            self.missing.push(field);
        }
        trimmed.to_owned()
    }

    /// Take a field verbatim; only an empty value counts as missing.
    pub(crate) fn raw(&mut self, field: &'static str, value: Option<String>) -> String {
        let value = value.unwrap_or_default();
        if value.is_empty() {
            self.missing.push(field);
        }
        value
    }

    /// Fields found blank so far, in the order they were read.
    pub(crate) fn finish(self) -> Result<(), Vec<&'static str>> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(self.missing)
        }
    }
}

/// Build an `invalid_request` error pointing at one field.
pub(crate) fn field_error(message: impl Into<String>, field: &str, code: &str) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

/// Build an `invalid_request` error listing the blank required fields.
pub(crate) fn missing_fields_error(message: impl Into<String>, fields: &[&'static str]) -> Error {
    Error::invalid_request(message).with_details(json!({
        "code": "missing_field",
        "fields": fields,
    }))
}

/// True when `message` carries at least [`MESSAGE_MIN_CHARS`] characters.
pub(crate) fn message_long_enough(message: &str) -> bool {
    message.chars().count() >= MESSAGE_MIN_CHARS
}
