pub mod chart_writer;
pub mod summary_writer;
pub mod text_safe_backend;

pub use chart_writer::{ChartKind, ChartOutcome, ChartWriter};
pub use summary_writer::SummaryWriter;
pub use text_safe_backend::TextSafeBackend;
