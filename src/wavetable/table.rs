use crate::error::{Result, WavetableError};

/// Rows of `frame_size` signed 16-bit samples stored back to back.
///
/// Row `r`, column `i` lives at `r * frame_size + i`. Every row is complete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wavetable {
    frame_size: usize,
    samples: Vec<i16>,
}

impl Wavetable {
    pub fn from_samples(frame_size: usize, samples: Vec<i16>) -> Result<Self> {
        if frame_size == 0 {
            return Err(WavetableError::InvalidTable("frame size must be non-zero".into()));
        }
        if samples.len() % frame_size != 0 {
            return Err(WavetableError::InvalidTable(format!(
                "{} samples is not a whole number of {}-sample rows",
                samples.len(),
                frame_size
            )));
        }
        Ok(Self {
            frame_size,
            samples,
        })
    }

    /// Caller guarantees `frame_size > 0` and whole rows.
    pub(crate) fn from_whole_rows(frame_size: usize, samples: Vec<i16>) -> Self {
        debug_assert!(frame_size > 0 && samples.len() % frame_size == 0);
        Self {
            frame_size,
            samples,
        }
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    pub fn row_count(&self) -> usize {
        self.samples.len() / self.frame_size
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn row(&self, r: usize) -> Option<&[i16]> {
        let start = r.checked_mul(self.frame_size)?;
        self.samples.get(start..start + self.frame_size)
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, i16> {
        self.samples.chunks_exact(self.frame_size)
    }

    /// Every sample negated. The table itself is left untouched.
    pub fn inverted_samples(&self) -> impl ExactSizeIterator<Item = i16> + '_ {
        self.samples.iter().map(|s| s.saturating_neg())
    }

    pub fn invert_in_place(&mut self) {
        for s in &mut self.samples {
            *s = s.saturating_neg();
        }
    }

    /// Keep only rows for which `keep` returns true, preserving order.
    /// Returns the number of rows dropped.
    pub fn retain_rows<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&[i16]) -> bool,
    {
        let before = self.row_count();
        let mut kept = Vec::with_capacity(self.samples.len());
        for row in self.samples.chunks_exact(self.frame_size) {
            if keep(row) {
                kept.extend_from_slice(row);
            }
        }
        self.samples = kept;
        before - self.row_count()
    }
}
