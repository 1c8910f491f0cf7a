//! Storefront error codes
//!
//! Codes are grouped by range:
//! - 0xxx: request and lookup failures
//! - 1xxx: admin sign-in
//! - 6xxx: catalog form rules
//! - 9xxx: server faults

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric error code carried in every [`ApiResponse`](super::ApiResponse)
///
/// Serialized as a bare `u16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    Success = 0,
    /// A form field broke a length or presence rule
    ValidationFailed = 2,
    NotFound = 3,
    /// Unique constraint hit (admin username)
    AlreadyExists = 4,
    /// Body could not be read as a form
    InvalidRequest = 5,

    InvalidCredentials = 1002,

    ItemNotFound = 6001,
    CategoryRequired = 6002,
    InvalidPrice = 6003,
    ImageRequired = 6004,
    InvalidAttributeList = 6005,

    InternalError = 9001,
    DatabaseError = 9002,
    /// Missing or invalid environment setting
    ConfigError = 9003,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default message, shown when the error carries no custom text
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::ItemNotFound => "Pastry not found",
            ErrorCode::CategoryRequired => "New category name cannot be empty.",
            ErrorCode::InvalidPrice => "Price must be a non-negative number",
            ErrorCode::ImageRequired => "No valid image file uploaded.",
            ErrorCode::InvalidAttributeList => "List fields must be JSON arrays of strings",
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// A `u16` that names no [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => ErrorCode::Success,
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            4 => ErrorCode::AlreadyExists,
            5 => ErrorCode::InvalidRequest,
            1002 => ErrorCode::InvalidCredentials,
            6001 => ErrorCode::ItemNotFound,
            6002 => ErrorCode::CategoryRequired,
            6003 => ErrorCode::InvalidPrice,
            6004 => ErrorCode::ImageRequired,
            6005 => ErrorCode::InvalidAttributeList,
            9001 => ErrorCode::InternalError,
            9002 => ErrorCode::DatabaseError,
            9003 => ErrorCode::ConfigError,
            _ => return Err(InvalidErrorCode(value)),
        };
        Ok(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
