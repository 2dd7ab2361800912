pub mod field_parsers;
pub mod normalizer;
pub mod pipeline;

pub use field_parsers::{coerce_price, parse_duration_minutes, parse_journey_date, parse_stops};
pub use normalizer::Normalizer;
pub use pipeline::{EdaPipeline, PipelineReport};
