use super::buffer::PixelBuffer;

const R_WEIGHT: f32 = 0.2989;
const G_WEIGHT: f32 = 0.587;
const B_WEIGHT: f32 = 0.114;

/// Normalized luminance (0.0-1.0) of one pixel.
///
/// One- and two-channel pixels are treated as gray with the first channel
/// standing in for R, G and B. A trailing alpha channel is ignored.
pub fn luminance(pixel: &[u8]) -> f32 {
    let (r, g, b) = match *pixel {
        [r, g, b, ..] => (r, g, b),
        [v, ..] => (v, v, v),
        [] => (0, 0, 0),
    };
    (R_WEIGHT * r as f32 + G_WEIGHT * g as f32 + B_WEIGHT * b as f32) / 255.0
}

/// One luminance value per source pixel, row-major.
#[derive(Clone, Debug)]
pub struct LuminanceField {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl LuminanceField {
    /// Consumes the pixel buffer; the raw bytes are released once this returns.
    pub fn from_pixels(pixels: PixelBuffer) -> Self {
        let values = pixels.pixels().map(luminance).collect();
        Self {
            width: pixels.width(),
            height: pixels.height(),
            values,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Nearest-neighbour resample of every row to `frame_size` columns.
    ///
    /// Destination column `x` reads source column `floor(x * width / frame_size)`.
    pub fn resample(&self, frame_size: usize) -> ResampledField {
        let width = self.width as usize;
        let source_columns: Vec<usize> = (0..frame_size)
            .map(|x| ((x as u64 * width as u64) / frame_size as u64) as usize)
            .collect();

        let mut values = Vec::with_capacity(frame_size * self.height as usize);
        for row in self.values.chunks_exact(width) {
            values.extend(source_columns.iter().map(|&src| row[src]));
        }

        ResampledField {
            frame_size,
            height: self.height,
            values,
        }
    }
}

/// Luminance resampled to the wavetable frame width; `height` rows of `frame_size`.
#[derive(Clone, Debug)]
pub struct ResampledField {
    frame_size: usize,
    height: u32,
    values: Vec<f32>,
}

impl ResampledField {
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn row(&self, y: usize) -> &[f32] {
        let start = y * self.frame_size;
        &self.values[start..start + self.frame_size]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn pure_red_uses_red_weight() {
        assert!(approx(luminance(&[255, 0, 0]), 0.2989));
        assert!(approx(luminance(&[0, 255, 0]), 0.587));
        assert!(approx(luminance(&[0, 0, 255]), 0.114));
    }

    #[test]
    fn gray_channels_replicate() {
        // weights sum to 0.9999
        assert!(approx(luminance(&[255]), 0.9999));
        assert!(approx(luminance(&[255, 0]), luminance(&[255])));
        assert_eq!(luminance(&[0, 255]), 0.0);
    }

    #[test]
    fn channel_count_selects_mapping() {
        // 1-2 channels read only the first sample, 3-4 read R, G, B
        assert_eq!(luminance(&[40, 200]), luminance(&[40, 40, 40]));
        assert_eq!(luminance(&[40, 200, 0, 9]), luminance(&[40, 200, 0]));
        assert_eq!(luminance(&[]), 0.0);
    }

    #[test]
    fn alpha_is_ignored() {
        assert_eq!(luminance(&[10, 20, 30, 0]), luminance(&[10, 20, 30]));
        assert_eq!(luminance(&[10, 20, 30, 255]), luminance(&[10, 20, 30]));
    }

    #[test]
    fn resample_picks_nearest_left_column() {
        // 4 wide, 1 tall gray ramp: 0, 85, 170, 255
        let pixels = PixelBuffer::new(4, 1, 1, vec![0, 85, 170, 255]).unwrap();
        let field = LuminanceField::from_pixels(pixels);
        let down = field.resample(2);
        assert_eq!(down.row(0), &[field.values()[0], field.values()[2]]);

        let up = field.resample(8);
        let v = field.values();
        assert_eq!(up.row(0), &[v[0], v[0], v[1], v[1], v[2], v[2], v[3], v[3]]);
    }

    #[test]
    fn resample_keeps_row_count() {
        let pixels = PixelBuffer::new(3, 5, 3, vec![128; 45]).unwrap();
        let field = LuminanceField::from_pixels(pixels).resample(16);
        assert_eq!(field.height(), 5);
        assert_eq!(field.frame_size(), 16);
        assert_eq!(field.row(4).len(), 16);
    }
}
