use crate::models::CellValue;

/// The input sheet as loaded: a header row and untyped cells.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    /// Build a table, padding or truncating every row to the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();

        Self { columns, rows }
    }

    /// Position of the first column with this exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_padded_to_header_width() {
        let table = RawTable::new(
            vec!["Airline".into(), "Price".into()],
            vec![
                vec![CellValue::Text("IndiGo".into())],
                vec![
                    CellValue::Text("Vistara".into()),
                    CellValue::Number(5000.0),
                    CellValue::Number(1.0),
                ],
            ],
        );

        assert_eq!(table.rows[0].len(), 2);
        assert_eq!(table.rows[0][1], CellValue::Empty);
        assert_eq!(table.rows[1].len(), 2);
        assert_eq!(table.column_index("Price"), Some(1));
        assert!(!table.has_column("Duration"));
    }
}
