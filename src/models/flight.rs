use chrono::NaiveDate;

use crate::models::CellValue;

/// A row that survived price coercion, with its derived fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightRecord {
    /// Raw cells in input column order; the price cell holds the coerced number.
    pub cells: Vec<CellValue>,
    pub date: Option<NaiveDate>,
    pub duration_min: Option<u32>,
    pub stops: Option<u32>,
    pub airline: Option<String>,
    pub price: f64,
}

impl FlightRecord {
    /// Missing raw cells plus missing derived fields.
    pub fn null_count(&self) -> usize {
        let raw = self.cells.iter().filter(|c| c.is_empty()).count();
        let derived = [
            self.date.is_none(),
            self.duration_min.is_none(),
            self.stops.is_none(),
        ]
        .iter()
        .filter(|missing| **missing)
        .count();

        raw + derived
    }
}

/// The cleaned table the aggregator and reporter read from.
#[derive(Debug, Clone, Default)]
pub struct FlightTable {
    pub columns: Vec<String>,
    pub records: Vec<FlightRecord>,
    pub has_airline: bool,
    /// Rows removed because their price could not be coerced.
    pub dropped_rows: usize,
}

impl FlightTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.price).collect()
    }

    pub fn durations(&self) -> Vec<f64> {
        self.records
            .iter()
            .filter_map(|r| r.duration_min.map(f64::from))
            .collect()
    }

    pub fn has_airlines(&self) -> bool {
        self.has_airline && self.records.iter().any(|r| r.airline.is_some())
    }

    pub fn has_durations(&self) -> bool {
        self.records.iter().any(|r| r.duration_min.is_some())
    }

    pub fn has_stops(&self) -> bool {
        self.records.iter().any(|r| r.stops.is_some())
    }
}
