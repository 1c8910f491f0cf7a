//! Error codes, [`AppError`] and the [`ApiResponse`] envelope
//!
//! Codes are numbered by range (0xxx request, 1xxx sign-in, 6xxx catalog
//! rules, 9xxx server faults); see [`ErrorCategory`].
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::with_message(ErrorCode::ValidationFailed, "Price must be a number");
//! let err = err.with_detail("field", "price");
//!
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(2));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
