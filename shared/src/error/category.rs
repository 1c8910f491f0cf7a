//! Error code ranges

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Which range a code falls in. Only `System` errors are logged when they
/// are turned into a response; the rest are the client's doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    General,
    Auth,
    Catalog,
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code {
            1000..2000 => Self::Auth,
            6000..7000 => Self::Catalog,
            9000.. => Self::System,
            _ => Self::General,
        }
    }
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
