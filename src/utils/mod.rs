pub mod constants;
pub mod format;
pub mod progress;

pub use constants::*;
pub use format::{format_optional, format_rupees};
pub use progress::ProgressReporter;
