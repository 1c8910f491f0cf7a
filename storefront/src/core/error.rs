//! Start-up errors

use shared::AppError;
use thiserror::Error;

use crate::ingest::IngestError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Initialization failed: {0}")]
    Init(#[from] AppError),

    #[error("Image store error: {0}")]
    Storage(#[from] IngestError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
