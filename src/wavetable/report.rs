use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::table::Wavetable;
use super::trim::RowStats;

/// Per-row min/max/variance listing, for inspecting a table before it is trimmed.
#[derive(Debug, Serialize)]
pub struct RowReport {
    pub frame_size: usize,
    pub rows: Vec<RowStats>,
}

impl RowReport {
    pub fn new(table: &Wavetable) -> Self {
        Self {
            frame_size: table.frame_size(),
            rows: table.row_stats(),
        }
    }

    /// Rows whose variance does not exceed `threshold`.
    pub fn quiet_rows(&self, threshold: u16) -> usize {
        self.rows
            .iter()
            .filter(|r| r.variance <= threshold as i32)
            .count()
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize row report")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write row report: {}", path.display()))?;
        log::info!("Row report written to {}", path.display());
        Ok(())
    }
}

impl fmt::Display for RowReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(
                f,
                "Row# {} min: {} max: {} variance {}",
                row.index, row.min, row.max, row.variance
            )?;
        }
        Ok(())
    }
}
