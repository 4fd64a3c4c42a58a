// src/utils/error.rs
use thiserror::Error;

use crate::workbook::models::CellRef;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // e.g., 404 Not Found, 403 Forbidden
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to parse workbook: {0}")]
    Parse(#[from] calamine::Error),

    #[error("Workbook contains no sheets")]
    EmptyWorkbook,

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Sheet '{0}' declares no used cell range")]
    MissingRange(String),

    #[error("Missing occurrence value at {0}")]
    MissingOccurrence(CellRef),

    #[error("Expecting a number at {0}")]
    InvalidOccurrenceType(CellRef),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Workbook download failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
