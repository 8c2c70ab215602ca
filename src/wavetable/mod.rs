//! Wavetable assembly from resampled luminance, plus the post-processing passes.

pub mod assemble;
pub mod report;
pub mod table;
pub mod trim;

pub use assemble::{assemble, normalize_sample, MAX_SAMPLE};
pub use report::RowReport;
pub use table::Wavetable;
pub use trim::{row_extent, RowStats};
