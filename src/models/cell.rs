use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::constants::NA_VALUES;

/// One raw cell as read from the input sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Build a text cell, mapping the spreadsheet NA spellings to `Empty`.
    pub fn from_text(text: &str) -> Self {
        if NA_VALUES.contains(&text.trim()) {
            CellValue::Empty
        } else {
            CellValue::Text(text.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Label used when the cell serves as a grouping key.
    pub fn to_label(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::DateTime(dt) => write!(f, "{}", dt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_na_text_is_empty() {
        assert!(CellValue::from_text("").is_empty());
        assert!(CellValue::from_text("  ").is_empty());
        assert!(CellValue::from_text("NaN").is_empty());
        assert!(CellValue::from_text("#N/A").is_empty());
        assert!(CellValue::from_text("None").is_empty());
        assert!(CellValue::from_text("#N/A N/A").is_empty());
        assert!(CellValue::from_text("1.#QNAN").is_empty());
        assert!(CellValue::from_text("-1.#IND").is_empty());
        assert_eq!(
            CellValue::from_text("IndiGo"),
            CellValue::Text("IndiGo".to_string())
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(CellValue::Empty.to_label(), None);
        assert_eq!(CellValue::Number(3.0).to_label().as_deref(), Some("3"));
        assert_eq!(
            CellValue::Text("Air India".into()).to_label().as_deref(),
            Some("Air India")
        );
    }
}
