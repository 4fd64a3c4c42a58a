// src/workbook/mod.rs
pub mod client;
pub mod models;

// Re-export configuration types for convenience
#[allow(unused_imports)]
pub use models::{CellRef, ExtractOptions, PartialOptions};
