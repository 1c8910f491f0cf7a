//! HTTP status for each error code

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::NotFound | Self::ItemNotFound => StatusCode::NOT_FOUND,
            Self::AlreadyExists => StatusCode::CONFLICT,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::CategoryRequired
            | Self::InvalidPrice
            | Self::ImageRequired
            | Self::InvalidAttributeList => StatusCode::BAD_REQUEST,
        }
    }
}
