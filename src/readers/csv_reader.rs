use crate::error::{EdaError, Result};
use crate::models::{CellValue, RawTable};
use csv::{ReaderBuilder, Trim};
use encoding_rs::{UTF_8, WINDOWS_1252};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Reads a delimited export of the flight sheet.
pub struct CsvTableReader {
    delimiter: u8,
}

impl CsvTableReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn read_table(&self, path: &Path) -> Result<RawTable> {
        let bytes = fs::read(path)?;
        let text = decode(&bytes);
        debug!("Read {} bytes from {}", bytes.len(), path.display());
        self.parse_str(&text)
    }

    /// Parse CSV text; the first record is the header.
    pub fn parse_str(&self, text: &str) -> Result<RawTable> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                if h.is_empty() {
                    format!("Unnamed: {}", i)
                } else {
                    h.to_string()
                }
            })
            .collect();

        if columns.is_empty() {
            return Err(EdaError::InvalidFormat(
                "CSV input has no header row".to_string(),
            ));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(CellValue::from_text).collect());
        }

        Ok(RawTable::new(columns, rows))
    }
}

impl Default for CsvTableReader {
    fn default() -> Self {
        Self::new()
    }
}

/// UTF-8 (BOM stripped) when valid, otherwise Windows-1252.
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
    if !had_errors {
        return text;
    }
    warn!("Input is not valid UTF-8; decoding as Windows-1252");
    WINDOWS_1252.decode_without_bom_handling(bytes).0
}
