use serde::Serialize;

use super::table::Wavetable;

/// Min/max summary of one wavetable row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RowStats {
    pub index: usize,
    pub min: i16,
    pub max: i16,
    /// `max - min`; how much waveform shape the row carries.
    pub variance: i32,
}

impl RowStats {
    pub fn of_row(index: usize, row: &[i16]) -> Self {
        let (min, max) = row_extent(row);
        Self {
            index,
            min,
            max,
            variance: max as i32 - min as i32,
        }
    }
}

/// Smallest and largest sample of a row. An empty row reports (0, 0).
pub fn row_extent(row: &[i16]) -> (i16, i16) {
    let mut iter = row.iter().copied();
    let Some(first) = iter.next() else {
        return (0, 0);
    };
    iter.fold((first, first), |(lo, hi), s| (lo.min(s), hi.max(s)))
}

impl Wavetable {
    /// Drop every row whose variance does not exceed `threshold`.
    /// Returns the number of rows removed.
    pub fn trim(&mut self, threshold: u16) -> usize {
        let removed = self.retain_rows(|row| {
            let (min, max) = row_extent(row);
            max as i32 - min as i32 > threshold as i32
        });
        log::debug!(
            "Trim at variance {}: removed {}, kept {}",
            threshold,
            removed,
            self.row_count()
        );
        removed
    }

    pub fn row_stats(&self) -> Vec<RowStats> {
        self.rows()
            .enumerate()
            .map(|(i, row)| RowStats::of_row(i, row))
            .collect()
    }
}
