// src/core/names.rs
//! Name ingestion: produce an ordered sequence of non-empty strings, or
//! fail. The engine treats both failure kinds identically (no spin starts);
//! the distinction only changes the guidance shown to the user.

use crate::core::sheet;
use log::info;
use std::fmt;

#[derive(Debug, Clone)]
pub enum NameSource {
    /// Newline-separated list, e.g. the contents of a names file.
    Manual(String),
    /// Google Sheet link or bare spreadsheet id.
    Sheet(String),
}

#[derive(Debug)]
pub enum IngestError {
    /// Manual input with no usable names, or none at all.
    EmptyInput(String),
    /// Remote source unreachable, malformed, or empty.
    SourceUnavailable(String),
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::EmptyInput(msg) => write!(f, "{}", msg),
            IngestError::SourceUnavailable(msg) => {
                write!(f, "{} Falling back to manual input is the most reliable option.", msg)
            }
        }
    }
}

impl std::error::Error for IngestError {}

/// Resolves a source into the raffle roster. Order is preserved and
/// duplicates in the input are kept as-is (each occupies its own slice).
pub fn fetch_names(source: &NameSource) -> Result<Vec<String>, IngestError> {
    match source {
        NameSource::Manual(text) => {
            let names = split_manual_list(text);
            if names.is_empty() {
                return Err(IngestError::EmptyInput(
                    "Please enter at least one name.".to_string(),
                ));
            }
            info!("Loaded {} name(s) from manual input.", names.len());
            Ok(names)
        }
        NameSource::Sheet(locator) => {
            let names = sheet::fetch_first_column(locator).map_err(|e| {
                IngestError::SourceUnavailable(format!("Error accessing Google Sheet: {}.", e))
            })?;
            if names.is_empty() {
                return Err(IngestError::SourceUnavailable(
                    "No names found in the sheet.".to_string(),
                ));
            }
            info!("Loaded {} name(s) from the sheet.", names.len());
            Ok(names)
        }
    }
}

/// One name per line, trimmed, empty lines dropped.
fn split_manual_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
