// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::error::StorageError;
use crate::workbook::models::ExtractOptions;

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Writes the extracted values as a JSON array to `<base_dir>/<name>.json`.
    /// Serialization completes before the write, so a failure leaves no
    /// partially written array behind.
    pub fn save_values(&self, name: &str, values: &[String]) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{name}.json"));

        let json = serde_json::to_string(values)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, json).map_err(StorageError::IoError)?;

        tracing::info!("Saved {} values to {}", values.len(), file_path.display());

        Ok(file_path)
    }

    /// Writes a `<name>.meta.json` sidecar describing the extraction
    pub fn save_values_metadata(
        &self,
        name: &str,
        options: &ExtractOptions,
        value_count: usize,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{name}.meta.json"));

        let metadata = serde_json::json!({
            "url": options.url,
            "sheetName": options.sheet_name,
            "row": options.row,
            "column": options.column,
            "minOccurrences": options.min_occurrences,
            "valueCount": value_count,
            "extractionTimestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }
}
