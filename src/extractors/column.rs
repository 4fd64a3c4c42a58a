// src/extractors/column.rs

// --- Imports ---
use std::collections::HashSet;
use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};

use crate::utils::error::ExtractError;
use crate::workbook::models::{CellRef, ExtractOptions};

// --- Main Extractor Structure ---
/// Runs the decode -> select sheet -> scan -> normalize stages over a
/// downloaded workbook and yields the ordered list of column values.
pub struct ColumnExtractor {
    options: ExtractOptions,
}

impl ColumnExtractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extracts the configured column from raw workbook bytes.
    pub fn extract(&self, content: &[u8]) -> Result<Vec<String>, ExtractError> {
        // 1. Parse the workbook document (format detected from the bytes)
        tracing::info!("Parsing workbook ({} bytes)", content.len());
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(content))?;

        // 2. Select the sheet: configured name, or first by declaration order
        let sheet_names = workbook.sheet_names().to_vec();
        let sheet_name = resolve_sheet_name(&sheet_names, self.options.sheet_name.as_deref())?;
        tracing::debug!("Selected sheet: {}", sheet_name);

        let range = workbook.worksheet_range(&sheet_name)?;

        // 3. Walk the column top-down until an empty cell ends the run
        tracing::info!("Reading values");
        let mut values = scan_column(&range, &sheet_name, &self.options)?;
        tracing::debug!("Scanned {} raw values from sheet '{}'", values.len(), sheet_name);

        // 4. Normalization stages, fixed order, each gated by its flag
        if self.options.trim_whitespaces {
            tracing::info!("Filtering whitespaces");
            trim_whitespaces(&mut values);
        }
        if self.options.to_lowercase {
            tracing::info!("Converting to lowercase");
            convert_to_lowercase(&mut values);
        }
        if self.options.remove_duplicates {
            tracing::info!("Filtering duplicates");
            remove_duplicates(&mut values);
        }

        Ok(values)
    }
}

// --- Stage Helpers ---

/// Picks the sheet to scan. A configured name must exist in the workbook;
/// without one the document's first sheet is used.
fn resolve_sheet_name(
    sheet_names: &[String],
    requested: Option<&str>,
) -> Result<String, ExtractError> {
    match requested {
        Some(name) => sheet_names
            .iter()
            .find(|n| n.as_str() == name)
            .cloned()
            .ok_or_else(|| ExtractError::SheetNotFound(name.to_string())),
        None => sheet_names
            .first()
            .cloned()
            .ok_or(ExtractError::EmptyWorkbook),
    }
}

/// Scans one column of the used range, top-down from the configured start
/// cell, and collects display strings until the run ends.
///
/// The scan stops only on an absent cell or an empty display string. A row
/// filtered out by `min_occurrences` is skipped, never a stop condition.
fn scan_column(
    range: &Range<Data>,
    sheet_name: &str,
    options: &ExtractOptions,
) -> Result<Vec<String>, ExtractError> {
    let (start, end) = match (range.start(), range.end()) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err(ExtractError::MissingRange(sheet_name.to_string())),
    };

    // 1-based configuration coordinates are offsets from the used range
    // origin. Same arithmetic feeds the occurrence lookup below, one
    // column to the right.
    let first_row = start.0 + options.row - 1;
    let target_col = start.1 + options.column - 1;

    let mut values = Vec::new();

    for row in first_row..=end.0 {
        let cell = match range.get_value((row, target_col)) {
            None | Some(Data::Empty) => break,
            Some(cell) => cell,
        };
        let value = cell_to_string(cell);
        if value.is_empty() {
            break;
        }

        if let Some(min_occurrences) = options.min_occurrences {
            let occurrence_ref = CellRef::from_zero_based(row, target_col + 1);
            let occurrence = match range.get_value((row, target_col + 1)) {
                None | Some(Data::Empty) => {
                    return Err(ExtractError::MissingOccurrence(occurrence_ref))
                }
                Some(cell) => cell,
            };
            let count = match occurrence {
                Data::Int(v) => *v as f64,
                Data::Float(v) => *v,
                _ => return Err(ExtractError::InvalidOccurrenceType(occurrence_ref)),
            };
            if count < min_occurrences {
                // Below threshold: drop this row but keep scanning
                continue;
            }
        }

        values.push(value);
    }

    Ok(values)
}

/// Formatted display text of a cell; `Empty` renders as "".
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.to_string(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => v.to_string(),
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

fn trim_whitespaces(values: &mut [String]) {
    for value in values.iter_mut() {
        *value = value.trim().to_string();
    }
}

fn convert_to_lowercase(values: &mut [String]) {
    for value in values.iter_mut() {
        *value = value.to_lowercase();
    }
}

/// Keeps the first occurrence of each distinct value, preserving order.
fn remove_duplicates(values: &mut Vec<String>) {
    let mut seen = HashSet::new();
    values.retain(|value| seen.insert(value.clone()));
}
