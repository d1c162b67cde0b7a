// src/core/sheet.rs
//! Google Sheets name source.
//!
//! The sheet is fetched as its CSV export through the allorigins proxy (the
//! JSON wrapper endpoint), and names are taken from the first column of each
//! row. Any failure along the way surfaces as a `SheetError`; callers map it
//! to source-unavailable guidance for the user.

use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

const PROXY_URL: &str = "https://api.allorigins.win/get?url=";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug)]
pub enum SheetError {
    BadLocator(String),
    Http(String),
    Malformed(String),
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetError::BadLocator(link) => write!(f, "invalid Google Sheet link: {}", link),
            SheetError::Http(e) => write!(f, "HTTP error: {}", e),
            SheetError::Malformed(e) => write!(f, "unparseable sheet response: {}", e),
        }
    }
}

impl std::error::Error for SheetError {}

// Sheet links come as .../d/<id>/edit, .../spreadsheets/d/<id>#gid=0, or the
// bare id pasted on its own.
static SHEET_ID_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/d/([a-zA-Z0-9-_]+)").expect("sheet id path regex"));
static SHEET_ID_BARE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9-_]{20,}").expect("bare sheet id regex"));

#[derive(Deserialize, Debug)]
struct ProxyResponse {
    contents: String,
}

pub fn extract_sheet_id(locator: &str) -> Option<String> {
    if let Some(caps) = SHEET_ID_PATH.captures(locator) {
        return Some(caps[1].to_string());
    }
    SHEET_ID_BARE.find(locator).map(|m| m.as_str().to_string())
}

/// Exposes the configured ureq Agent used for sheet requests.
pub fn get_agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .timeout_global(Some(REQUEST_TIMEOUT))
        .build()
        .into()
}

/// Fetches the sheet and returns the trimmed, non-empty first-column values
/// in row order.
pub fn fetch_first_column(locator: &str) -> Result<Vec<String>, SheetError> {
    let sheet_id = extract_sheet_id(locator)
        .ok_or_else(|| SheetError::BadLocator(locator.to_string()))?;
    info!("Extracted sheet id: {}", sheet_id);

    let export_url = format!(
        "https://docs.google.com/spreadsheets/d/{}/export?format=csv",
        sheet_id
    );
    let proxy_url = format!("{}{}", PROXY_URL, percent_encode(&export_url));

    let agent = get_agent();
    let resp = agent.get(&proxy_url).call().map_err(|e| {
        warn!("Sheet request failed: {}", e);
        SheetError::Http(e.to_string())
    })?;
    let mut body = resp.into_body();
    let text = body
        .read_to_string()
        .map_err(|e| SheetError::Http(e.to_string()))?;

    let wrapped: ProxyResponse =
        serde_json::from_str(&text).map_err(|e| SheetError::Malformed(e.to_string()))?;
    info!("Received sheet data, {} bytes.", wrapped.contents.len());

    Ok(parse_first_column(&wrapped.contents))
}

/// First CSV column of each row, trimmed, empty rows dropped. Splits on bare
/// commas; quoted cells are not supported.
pub fn parse_first_column(csv: &str) -> Vec<String> {
    csv.lines()
        .filter_map(|row| row.split(',').next())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn percent_encode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() * 3);
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
