use crate::error::{EdaError, Result};
use crate::models::{CellValue, RawTable};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::debug;

/// Reads the first worksheet of an Excel/OpenDocument workbook.
pub struct WorkbookReader {
    sheet_index: usize,
}

impl WorkbookReader {
    pub fn new() -> Self {
        Self { sheet_index: 0 }
    }

    /// Read the sheet; the first row becomes the header.
    pub fn read_table(&self, path: &Path) -> Result<RawTable> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(self.sheet_index)
            .ok_or_else(|| EdaError::EmptyWorkbook {
                path: path.to_path_buf(),
            })??;

        let mut rows = range.rows();
        let columns: Vec<String> = match rows.next() {
            Some(header) => header
                .iter()
                .enumerate()
                .map(|(i, cell)| header_name(i, cell))
                .collect(),
            None => Vec::new(),
        };

        let body: Vec<Vec<CellValue>> = rows
            .map(|row| row.iter().map(convert_cell).collect())
            .collect();

        debug!(
            "Read {} rows x {} columns from sheet {} of {}",
            body.len(),
            columns.len(),
            self.sheet_index,
            path.display()
        );

        Ok(RawTable::new(columns, body))
    }
}

impl Default for WorkbookReader {
    fn default() -> Self {
        Self::new()
    }
}

fn header_name(index: usize, cell: &Data) -> String {
    match convert_cell(cell) {
        CellValue::Empty => format!("Unnamed: {}", index),
        other => other.to_string(),
    }
}

/// Map a calamine cell onto the crate's cell model.
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::from_text(s),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::Number(dt.as_f64())),
    }
}
