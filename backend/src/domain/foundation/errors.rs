//! Error types for the domain layer.
//!
//! Every failure that crosses a layer boundary is a [`DomainError`] tagged
//! with an [`ErrorKind`]. Callers classify errors by inspecting the kind,
//! never by comparing messages or error identity.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }
}

/// Error kinds, grouped by how a caller is expected to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // Token errors
    InvalidToken,
    ExpiredToken,

    // Identity errors
    InvalidUserId,
    InvalidEmail,
    InvalidAssertion,
    UserAlreadyExists,

    // Lookup errors
    DataNotFound,

    // Entitlement errors
    InvalidContentAccess,

    // Request errors
    ValidationFailed,
    BadRequest,
    SourceNotProvided,

    // Gate errors
    UnauthorizedAccess,

    // Deadline
    RequestTimeout,

    // Anything unanticipated from a collaborator
    Internal,
}

impl ErrorKind {
    /// Stable wire code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidToken => "INVALID_TOKEN",
            ErrorKind::ExpiredToken => "EXPIRED_TOKEN",
            ErrorKind::InvalidUserId => "INVALID_USER_ID",
            ErrorKind::InvalidEmail => "INVALID_EMAIL",
            ErrorKind::InvalidAssertion => "INVALID_TOKEN_EMAIL",
            ErrorKind::UserAlreadyExists => "USER_ALREADY_EXIST",
            ErrorKind::DataNotFound => "DATA_NOT_FOUND",
            ErrorKind::InvalidContentAccess => "INVALID_CONTENT_ACCESS",
            ErrorKind::ValidationFailed => "VALIDATION_FAILED",
            ErrorKind::BadRequest => "BAD_REQUEST",
            ErrorKind::SourceNotProvided => "SOURCE_NOT_PROVIDED",
            ErrorKind::UnauthorizedAccess => "UNAUTHORIZED_ACCESS",
            ErrorKind::RequestTimeout => "REQUEST_TIMEOUT",
            ErrorKind::Internal => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Returns true if the caller can act on this error (fix the request,
    /// re-authenticate). Internal failures and timeouts are not client errors.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ErrorKind::Internal | ErrorKind::RequestTimeout)
    }

    /// Returns true if the error relates to the bearer token itself.
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidToken | ErrorKind::ExpiredToken | ErrorKind::UnauthorizedAccess
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Standard domain error with kind, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub kind: ErrorKind,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ValidationFailed, message).with_detail("field", field.into())
    }

    /// Creates an internal error. The message is for logs only.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Creates a not-found error for the named record type.
    pub fn not_found(what: &str, id: impl fmt::Display) -> Self {
        Self::new(ErrorKind::DataNotFound, format!("{} not found", what)).with_detail("id", id.to_string())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns true if this error is of the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let kind = match &err {
            ValidationError::EmptyField { field } if field == "user_id" => ErrorKind::InvalidUserId,
            _ => ErrorKind::ValidationFailed,
        };
        DomainError::new(kind, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("username");
        assert_eq!(format!("{}", err), "Field 'username' cannot be empty");
    }

    #[test]
    fn domain_error_displays_kind_and_message() {
        let err = DomainError::new(ErrorKind::DataNotFound, "User not found");
        assert_eq!(format!("{}", err), "[DATA_NOT_FOUND] User not found");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::validation("amount", "must be positive")
            .with_detail("reason", "zero");

        assert_eq!(err.kind, ErrorKind::ValidationFailed);
        assert_eq!(err.details.get("field"), Some(&"amount".to_string()));
        assert_eq!(err.details.get("reason"), Some(&"zero".to_string()));
    }

    #[test]
    fn empty_user_id_converts_to_invalid_user_id() {
        let err: DomainError = ValidationError::empty_field("user_id").into();
        assert!(err.is(ErrorKind::InvalidUserId));
    }

    #[test]
    fn other_validation_errors_convert_to_validation_failed() {
        let err: DomainError = ValidationError::empty_field("template_id").into();
        assert!(err.is(ErrorKind::ValidationFailed));
    }

    #[test]
    fn internal_and_timeout_are_not_client_errors() {
        assert!(!ErrorKind::Internal.is_client_error());
        assert!(!ErrorKind::RequestTimeout.is_client_error());
        assert!(ErrorKind::InvalidContentAccess.is_client_error());
        assert!(ErrorKind::UnauthorizedAccess.is_client_error());
    }

    #[test]
    fn token_errors_are_classified() {
        assert!(ErrorKind::InvalidToken.is_token_error());
        assert!(ErrorKind::ExpiredToken.is_token_error());
        assert!(!ErrorKind::InvalidUserId.is_token_error());
    }

    #[test]
    fn error_kind_display_uses_wire_code() {
        assert_eq!(format!("{}", ErrorKind::RequestTimeout), "REQUEST_TIMEOUT");
        assert_eq!(format!("{}", ErrorKind::Internal), "INTERNAL_SERVER_ERROR");
    }
}
