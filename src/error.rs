use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EdaError>;

#[derive(Error, Debug)]
pub enum EdaError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook read error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Workbook '{}' contains no worksheets", path.display())]
    EmptyWorkbook { path: PathBuf },

    #[error("File not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Column '{0}' not found in the input file")]
    MissingColumn(String),

    #[error("Chart rendering error: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}
