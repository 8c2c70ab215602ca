//! WAV container side: serializing a wavetable and reading one back.

pub mod decode;
pub mod wav;

pub use decode::read_wavetable;
pub use wav::{encode_wav, write_wavetable, WavHeader, HEADER_LEN, SAMPLE_RATE};
