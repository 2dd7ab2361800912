pub mod cell;
pub mod flight;
pub mod table;

pub use cell::CellValue;
pub use flight::{FlightRecord, FlightTable};
pub use table::RawTable;
