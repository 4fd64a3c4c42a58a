// src/main.rs
mod extractors;
mod storage;
mod utils;
mod workbook;

use std::path::Path;

use clap::Parser;

use extractors::column::ColumnExtractor;
use storage::StorageManager;
use utils::AppError;
use workbook::client;
use workbook::models::{CellRef, ExtractOptions, PartialOptions};

/// Command Line Interface for the spreadsheet column extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL of the spreadsheet document to download
    #[arg(short, long)]
    url: Option<String>,

    /// 1-based row of the first cell to read (default: 1)
    #[arg(long)]
    row: Option<u32>,

    /// 1-based column of the cells to read (default: 1)
    #[arg(long)]
    column: Option<u32>,

    /// A1-style shorthand for the start cell, e.g. B3
    #[arg(long, conflicts_with_all = ["row", "column"])]
    cell: Option<CellRef>,

    /// Sheet to read (defaults to the workbook's first sheet)
    #[arg(short, long)]
    sheet: Option<String>,

    /// Drop rows whose adjacent occurrence count is below this threshold
    #[arg(long)]
    min_occurrences: Option<f64>,

    /// Disable whitespace trimming
    #[arg(long)]
    no_trim: bool,

    /// Disable lowercase folding
    #[arg(long)]
    no_lowercase: bool,

    /// Keep duplicate values
    #[arg(long)]
    keep_duplicates: bool,

    /// JSON file with partial options, merged over the defaults
    /// (CLI flags override the file)
    #[arg(short, long)]
    config: Option<String>,

    /// Output directory for the extracted values
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Basename of the output file (written as <name>.json)
    #[arg(short, long, default_value = "values")]
    name: String,

    /// Write a <name>.meta.json sidecar describing the extraction
    #[arg(long)]
    metadata: bool,

    /// Debug mode - save the raw downloaded workbook for inspection
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    /// Collects the CLI flags that were actually given into an overlay.
    fn to_partial(&self) -> PartialOptions {
        let (row, column) = match &self.cell {
            Some(cell) => (Some(cell.row), Some(cell.column)),
            None => (self.row, self.column),
        };
        PartialOptions {
            url: self.url.clone(),
            row,
            column,
            trim_whitespaces: self.no_trim.then_some(false),
            to_lowercase: self.no_lowercase.then_some(false),
            remove_duplicates: self.keep_duplicates.then_some(false),
            sheet_name: self.sheet.clone(),
            min_occurrences: self.min_occurrences,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting extraction for args: {:?}", args);

    // 3. Build the configuration: defaults, then config file, then CLI
    let mut options = ExtractOptions::default();
    if let Some(path) = &args.config {
        let raw = std::fs::read_to_string(path)?;
        let partial: PartialOptions = serde_json::from_str(&raw)
            .map_err(|e| AppError::Config(format!("Invalid config file {path}: {e}")))?;
        options.apply(partial);
    }
    options.apply(args.to_partial());
    options.validate().map_err(AppError::Config)?;

    // 4. Initialize storage
    let storage = StorageManager::new(&args.output_dir)?;

    // 5. Initialize the column extractor
    let extractor = ColumnExtractor::new(options);

    // 6. Download the workbook document
    let content = client::download_workbook(&extractor.options().url).await?;
    tracing::info!("Successfully downloaded workbook ({} bytes)", content.len());

    if args.debug {
        // Save the raw workbook for debugging
        let raw_path = Path::new(&args.output_dir).join("raw_workbook.bin");
        std::fs::write(&raw_path, &content)?;
        tracing::info!("Saved raw workbook to: {}", raw_path.display());
    }

    // 7. Extract and normalize the column values
    let values = extractor.extract(&content)?;
    tracing::info!("Extracted {} values", values.len());

    // 8. Persist the result
    tracing::info!("Saving to disk");
    let path = storage.save_values(&args.name, &values)?;
    tracing::info!("Saved values to: {}", path.display());

    if args.metadata {
        let meta_path = storage.save_values_metadata(&args.name, extractor.options(), values.len())?;
        tracing::info!("Saved metadata to: {}", meta_path.display());
    }

    Ok(())
}
