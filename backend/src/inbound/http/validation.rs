//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every failure becomes an `InvalidRequest` error whose details carry the
//! offending `field` and a machine-readable `code`.

use serde_json::json;

use crate::domain::{
    CompletionDate, CompletionValidationError, Error, HabitId, HabitValidationError,
    LoginValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidDate,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidDate => "invalid_date",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    fn with_code(self, code: &'static str) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code,
        }))
    }

    fn with_value(self, code: &'static str, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code,
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField.as_str())
}

pub(crate) fn parse_habit_id(value: &str, field: FieldName) -> Result<HabitId, Error> {
    value.parse().map_err(|_| {
        let field = field.as_str();
        ValidationError::new(field, format!("{field} must be a valid UUID"))
            .with_value(ErrorCode::InvalidUuid.as_str(), value)
    })
}

pub(crate) fn parse_date(value: &str, field: FieldName) -> Result<CompletionDate, Error> {
    CompletionDate::parse(value).map_err(|err: CompletionValidationError| {
        let field = field.as_str();
        ValidationError::new(field, format!("{field} must be a date formatted as YYYY-MM-DD"))
            .with_value(err.code(), value)
    })
}

pub(crate) fn parse_optional_date(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<CompletionDate>, Error> {
    value.map(|raw| parse_date(raw, field)).transpose()
}

impl From<HabitValidationError> for Error {
    fn from(err: HabitValidationError) -> Self {
        ValidationError::new(err.field(), err.to_string()).with_code(err.code())
    }
}

impl From<LoginValidationError> for Error {
    fn from(err: LoginValidationError) -> Self {
        ValidationError::new(err.field(), err.to_string()).with_code(err.code())
    }
}
