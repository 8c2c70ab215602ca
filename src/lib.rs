//! Convert raster images into 16-bit mono wavetable WAV files.
//!
//! A job decodes an image, reduces it to luminance, resamples each row to the
//! frame width, picks a fixed number of rows bottom-up, normalizes them to
//! signed 16-bit PCM and drops rows with too little shape to be useful.

pub mod audio;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod raster;
pub mod wavetable;

pub use error::{Result, WavetableError};
pub use pipeline::{Conversion, Converter, TableSettings};
pub use wavetable::Wavetable;
