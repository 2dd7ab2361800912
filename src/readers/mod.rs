pub mod csv_reader;
pub mod workbook_reader;

pub use csv_reader::CsvTableReader;
pub use workbook_reader::WorkbookReader;

use crate::error::{EdaError, Result};
use crate::models::RawTable;
use std::path::Path;
use tracing::info;

/// Load the input sheet, choosing the reader by file extension.
pub fn load_table(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        return Err(EdaError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let table = match extension.as_str() {
        "csv" => CsvTableReader::new().read_table(path)?,
        "tsv" => CsvTableReader::with_delimiter(b'\t').read_table(path)?,
        _ => WorkbookReader::new().read_table(path)?,
    };

    info!(
        "Loaded {} rows, {} columns from {}",
        table.len(),
        table.columns.len(),
        path.display()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_input_not_found() {
        let err = load_table(Path::new("definitely/not/here.xlsx")).unwrap_err();
        assert!(matches!(err, EdaError::InputNotFound { .. }));
        assert!(err.to_string().contains("here.xlsx"));
    }

    #[test]
    fn test_tab_separated_input() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("flights.tsv");
        std::fs::write(&path, "Airline\tPrice\nIndiGo\t3897\n")?;

        let table = load_table(&path)?;
        assert_eq!(table.columns, vec!["Airline", "Price"]);
        assert_eq!(table.len(), 1);
        Ok(())
    }
}
