use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, WavetableError>;

/// Failure modes of a conversion job. None of these are transient, so nothing retries.
#[derive(thiserror::Error, Debug)]
pub enum WavetableError {
    /// The image file is missing, unreadable, or not a supported format.
    #[error("failed to decode image {}: {source}", path.display())]
    DecodeFailure {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Fewer source rows than requested table rows.
    #[error("image height {height} is smaller than the requested {table_rows} table rows")]
    ImageTooSmall { height: u32, table_rows: usize },

    /// The destination could not be created or written.
    #[error("failed to write wavetable {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A written wavetable could not be read back.
    #[error("failed to read wavetable {}: {message}", path.display())]
    ReadBack { path: PathBuf, message: String },

    #[error("invalid pixel buffer: {0}")]
    InvalidPixelBuffer(String),

    #[error("invalid table settings: {0}")]
    InvalidSettings(String),

    #[error("invalid wavetable: {0}")]
    InvalidTable(String),
}

impl WavetableError {
    pub fn read_back(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ReadBack {
            path: path.into(),
            message: message.into(),
        }
    }
}
