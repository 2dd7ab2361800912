use crate::error::{EdaError, Result};
use crate::models::{CellValue, FlightRecord, FlightTable, RawTable};
use crate::processors::field_parsers::{
    coerce_price, parse_duration_minutes, parse_journey_date, parse_stops,
};
use crate::utils::constants::{
    COL_AIRLINE, COL_DATE_OF_JOURNEY, COL_DURATION, COL_PRICE, COL_TOTAL_STOPS,
};
use tracing::{debug, info, warn};

/// Positions of the columns the normalizer reads.
#[derive(Debug, Clone, Copy)]
struct ColumnLayout {
    price: usize,
    date: Option<usize>,
    duration: Option<usize>,
    stops: Option<usize>,
    airline: Option<usize>,
}

impl ColumnLayout {
    fn resolve(raw: &RawTable) -> Result<Self> {
        let price = raw
            .column_index(COL_PRICE)
            .ok_or_else(|| EdaError::MissingColumn(COL_PRICE.to_string()))?;

        let optional = |name: &str| {
            let index = raw.column_index(name);
            if index.is_none() {
                debug!("Column '{}' absent; derived values will be null", name);
            }
            index
        };

        Ok(Self {
            price,
            date: optional(COL_DATE_OF_JOURNEY),
            duration: optional(COL_DURATION),
            stops: optional(COL_TOTAL_STOPS),
            airline: optional(COL_AIRLINE),
        })
    }
}

/// Derives the date, duration and stop fields and filters rows by price.
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Consume the raw sheet and return the cleaned table.
    ///
    /// Fails only when the price column is absent. Rows whose price cannot be
    /// coerced are dropped; survivors keep their input order.
    pub fn normalize(&self, raw: RawTable) -> Result<FlightTable> {
        let layout = ColumnLayout::resolve(&raw)?;
        let total = raw.len();
        let mut records = Vec::with_capacity(total);

        for mut cells in raw.rows {
            let Some(price) = coerce_price(&cells[layout.price]) else {
                continue;
            };
            cells[layout.price] = CellValue::Number(price);

            let derive = |index: Option<usize>| index.map(|i| &cells[i]);
            let date = derive(layout.date).and_then(parse_journey_date);
            let duration_min = derive(layout.duration).and_then(parse_duration_minutes);
            let stops = derive(layout.stops).and_then(parse_stops);
            let airline = derive(layout.airline).and_then(CellValue::to_label);

            records.push(FlightRecord {
                cells,
                date,
                duration_min,
                stops,
                airline,
                price,
            });
        }

        let dropped_rows = total - records.len();
        if dropped_rows > 0 {
            warn!(
                "Dropped {} of {} rows with a non-numeric '{}'",
                dropped_rows, total, COL_PRICE
            );
        }
        info!("Cleaned table has {} rows", records.len());

        Ok(FlightTable {
            columns: raw.columns,
            records,
            has_airline: layout.airline.is_some(),
            dropped_rows,
        })
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
