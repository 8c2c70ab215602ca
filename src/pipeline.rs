use std::path::Path;

use crate::audio::WavHeader;
use crate::error::{Result, WavetableError};
use crate::raster::{decode_image, LuminanceField, PixelBuffer};
use crate::wavetable::{assemble, Wavetable};

pub const DEFAULT_FRAME_SIZE: usize = 1024;
/// Largest user table the target instrument accepts.
pub const DEFAULT_TABLE_ROWS: usize = 256;
pub const DEFAULT_TRIM_THRESHOLD: u16 = 3000;

/// Shape of the table a job produces. Fixed for the lifetime of a [`Converter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableSettings {
    pub frame_size: usize,
    pub table_rows: usize,
    /// `None` skips the variance trim.
    pub trim_threshold: Option<u16>,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            frame_size: DEFAULT_FRAME_SIZE,
            table_rows: DEFAULT_TABLE_ROWS,
            trim_threshold: Some(DEFAULT_TRIM_THRESHOLD),
        }
    }
}

impl TableSettings {
    pub fn validate(&self) -> Result<()> {
        if self.frame_size == 0 {
            return Err(WavetableError::InvalidSettings("frame size must be at least 1".into()));
        }
        if self.table_rows == 0 {
            return Err(WavetableError::InvalidSettings("table rows must be at least 1".into()));
        }
        let fits = self
            .frame_size
            .checked_mul(self.table_rows)
            .is_some_and(|samples| WavHeader::mono_pcm16(samples).is_ok());
        if !fits {
            return Err(WavetableError::InvalidSettings(format!(
                "{} rows of {} samples exceed the 4 GiB WAV size limit",
                self.table_rows, self.frame_size
            )));
        }
        Ok(())
    }
}

/// Result of a full image-to-table job.
#[derive(Debug)]
pub struct Conversion {
    pub table: Wavetable,
    /// Rows assembled before trimming.
    pub assembled_rows: usize,
    pub trimmed_rows: usize,
}

#[derive(Debug)]
pub struct Converter {
    settings: TableSettings,
}

impl Converter {
    pub fn new(settings: TableSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &TableSettings {
        &self.settings
    }

    /// Grayscale, resample and assemble an untrimmed table.
    pub fn process(&self, pixels: PixelBuffer) -> Result<Wavetable> {
        let TableSettings {
            frame_size,
            table_rows,
            ..
        } = self.settings;

        if (pixels.height() as usize) < table_rows {
            return Err(WavetableError::ImageTooSmall {
                height: pixels.height(),
                table_rows,
            });
        }

        let field = LuminanceField::from_pixels(pixels).resample(frame_size);
        Ok(assemble(&field, table_rows))
    }

    /// Decode `path` and assemble its untrimmed table.
    pub fn process_file(&self, path: &Path) -> Result<Wavetable> {
        let pixels = decode_image(path)?;
        self.process(pixels)
    }

    /// Apply the configured variance trim. Returns the number of rows removed.
    pub fn trim(&self, table: &mut Wavetable) -> usize {
        let Some(threshold) = self.settings.trim_threshold else {
            return 0;
        };
        let removed = table.trim(threshold);
        log::info!(
            "Trimmed {} rows under {} variance ({} remain)",
            removed,
            threshold,
            table.row_count()
        );
        removed
    }

    /// Decode `path`, build the table and apply the configured trim.
    pub fn convert_file(&self, path: &Path) -> Result<Conversion> {
        let mut table = self.process_file(path)?;
        let assembled_rows = table.row_count();
        let trimmed_rows = self.trim(&mut table);

        Ok(Conversion {
            table,
            assembled_rows,
            trimmed_rows,
        })
    }
}
