// src/workbook/models.rs
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

// Column letters first, then a 1-based row. Three letters cover every
// column a spreadsheet format actually allows (XFD = 16384).
static CELL_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]{1,3})([1-9][0-9]{0,6})$")
        .expect("Failed to compile CELL_REF_RE")
});

/// A 1-based (row, column) cell coordinate with A1-style formatting.
/// Used for the `--cell` shorthand and for naming coordinates in errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub row: u32,
    pub column: u32,
}

impl CellRef {
    /// Builds a reference from 0-based sheet coordinates.
    pub fn from_zero_based(row: u32, column: u32) -> Self {
        Self {
            row: row + 1,
            column: column + 1,
        }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut letters = String::new();
        let mut col = self.column;
        while col > 0 {
            let rem = ((col - 1) % 26) as u8;
            letters.insert(0, (b'A' + rem) as char);
            col = (col - 1) / 26;
        }
        write!(f, "{}{}", letters, self.row)
    }
}

impl FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = CELL_REF_RE
            .captures(s)
            .ok_or_else(|| format!("Invalid cell reference: '{s}'"))?;

        let mut column = 0u32;
        for c in caps[1].chars() {
            column = column * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
        }
        let row = caps[2]
            .parse::<u32>()
            .map_err(|e| format!("Invalid row in cell reference '{s}': {e}"))?;

        Ok(Self { row, column })
    }
}

/// Complete extraction configuration, immutable once the pipeline starts.
/// Built by merging partial overlays (config file, then CLI) over defaults.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Source URL of the workbook document.
    pub url: String,
    /// 1-based row of the first cell to read.
    pub row: u32,
    /// 1-based column of the cells to read.
    pub column: u32,
    pub trim_whitespaces: bool,
    pub to_lowercase: bool,
    pub remove_duplicates: bool,
    /// Sheet to read; `None` selects the document's first sheet.
    pub sheet_name: Option<String>,
    /// Threshold for the occurrence column one cell to the right.
    /// `None` disables occurrence filtering entirely.
    pub min_occurrences: Option<f64>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            url: String::new(),
            row: 1,
            column: 1,
            trim_whitespaces: true,
            to_lowercase: true,
            remove_duplicates: true,
            sheet_name: None,
            min_occurrences: None,
        }
    }
}

impl ExtractOptions {
    /// Overrides every field the overlay actually sets.
    pub fn apply(&mut self, overlay: PartialOptions) {
        if let Some(url) = overlay.url {
            self.url = url;
        }
        if let Some(row) = overlay.row {
            self.row = row;
        }
        if let Some(column) = overlay.column {
            self.column = column;
        }
        if let Some(trim) = overlay.trim_whitespaces {
            self.trim_whitespaces = trim;
        }
        if let Some(lower) = overlay.to_lowercase {
            self.to_lowercase = lower;
        }
        if let Some(dedupe) = overlay.remove_duplicates {
            self.remove_duplicates = dedupe;
        }
        if let Some(sheet_name) = overlay.sheet_name {
            self.sheet_name = Some(sheet_name);
        }
        if let Some(min) = overlay.min_occurrences {
            self.min_occurrences = Some(min);
        }
    }

    /// Checks the merged configuration before the pipeline starts.
    pub fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("No source URL configured (pass --url or set it in the config file)".to_string());
        }
        if self.row == 0 {
            return Err("Start row must be 1 or greater".to_string());
        }
        if self.column == 0 {
            return Err("Start column must be 1 or greater".to_string());
        }
        if let Some(min) = self.min_occurrences {
            if min < 0.0 {
                return Err(format!("minOccurrences must be non-negative, got {min}"));
            }
        }
        Ok(())
    }
}

/// Partial configuration overlay. Every field is optional so a JSON config
/// file only needs to name the options it changes; field names follow the
/// camelCase config grammar (`trimWhitespaces`, `minOccurrences`, ...).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialOptions {
    pub url: Option<String>,
    pub row: Option<u32>,
    pub column: Option<u32>,
    pub trim_whitespaces: Option<bool>,
    #[serde(rename = "toLowerCase")]
    pub to_lowercase: Option<bool>,
    pub remove_duplicates: Option<bool>,
    pub sheet_name: Option<String>,
    pub min_occurrences: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_ref_parse_and_format() {
        let cell: CellRef = "B3".parse().expect("B3 should parse");
        assert_eq!(cell, CellRef { row: 3, column: 2 });
        assert_eq!(cell.to_string(), "B3");

        // Lowercase input, multi-letter column
        let wide: CellRef = "aa12".parse().expect("aa12 should parse");
        assert_eq!(wide, CellRef { row: 12, column: 27 });
        assert_eq!(wide.to_string(), "AA12");
    }

    #[test]
    fn test_cell_ref_rejects_malformed_input() {
        assert!("".parse::<CellRef>().is_err());
        assert!("3B".parse::<CellRef>().is_err());
        assert!("B0".parse::<CellRef>().is_err());
        assert!("B".parse::<CellRef>().is_err());
        assert!("B1.5".parse::<CellRef>().is_err());
    }

    #[test]
    fn test_cell_ref_from_zero_based() {
        assert_eq!(CellRef::from_zero_based(0, 0).to_string(), "A1");
        assert_eq!(CellRef::from_zero_based(2, 1).to_string(), "B3");
    }

    #[test]
    fn test_default_options() {
        let options = ExtractOptions::default();
        assert_eq!((options.row, options.column), (1, 1));
        assert!(options.trim_whitespaces);
        assert!(options.to_lowercase);
        assert!(options.remove_duplicates);
        assert!(options.sheet_name.is_none());
        assert!(options.min_occurrences.is_none());
    }

    #[test]
    fn test_options_merge_precedence() {
        let mut options = ExtractOptions::default();

        // Config file overlay first
        let file: PartialOptions = serde_json::from_str(
            r#"{"url":"https://example.com/list.xlsx","row":3,"toLowerCase":false}"#,
        )
        .expect("config overlay should deserialize");
        options.apply(file);
        assert_eq!(options.row, 3);
        assert!(!options.to_lowercase);

        // CLI overlay wins over the file, untouched fields survive
        options.apply(PartialOptions {
            row: Some(5),
            ..Default::default()
        });
        assert_eq!(options.row, 5);
        assert_eq!(options.url, "https://example.com/list.xlsx");
        assert!(options.trim_whitespaces);
        assert!(!options.to_lowercase);
    }

    #[test]
    fn test_options_validation() {
        let mut options = ExtractOptions::default();
        assert!(options.validate().is_err(), "missing URL must be rejected");

        options.url = "https://example.com/list.xlsx".to_string();
        assert!(options.validate().is_ok());

        options.min_occurrences = Some(-1.0);
        assert!(options.validate().is_err());

        options.min_occurrences = Some(0.0);
        assert!(options.validate().is_ok());

        options.row = 0;
        assert!(options.validate().is_err());
    }
}
