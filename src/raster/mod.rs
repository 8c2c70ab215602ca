//! Image side of the transform: decoded pixels, luminance, horizontal resampling.

pub mod buffer;
pub mod decode;
pub mod luminance;

pub use buffer::PixelBuffer;
pub use decode::decode_image;
pub use luminance::{luminance, LuminanceField, ResampledField};
