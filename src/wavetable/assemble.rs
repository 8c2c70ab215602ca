use super::table::Wavetable;
use crate::raster::ResampledField;

/// Largest magnitude a normalized sample can take. -32768 is never produced,
/// so negation is always exact.
pub const MAX_SAMPLE: i16 = 32767;

/// Map luminance in [0, 1] onto [-32767, 32767].
pub fn normalize_sample(luminance: f32) -> i16 {
    let scaled = ((luminance * 2.0 - 1.0) * MAX_SAMPLE as f32).round();
    scaled.clamp(-(MAX_SAMPLE as f32), MAX_SAMPLE as f32) as i16
}

/// Select `table_rows` rows from the field and normalize them into a wavetable.
///
/// Rows are taken every `height / table_rows` source rows, walking from the
/// bottom of the image upwards, so wavetable row 0 is the lowest sampled image
/// row. Source rows past the last full stride are never reached. Callers must
/// ensure `height >= table_rows > 0`.
pub fn assemble(field: &ResampledField, table_rows: usize) -> Wavetable {
    let frame_size = field.frame_size();
    let height = field.height() as usize;
    let stride = (height / table_rows).max(1);

    let mut samples = Vec::with_capacity(frame_size * table_rows);
    let mut emitted = 0;
    for y in (0..height).rev() {
        if y % stride != 0 {
            continue;
        }
        log::trace!("sampling image row {} as wavetable row {}", y, emitted);
        samples.extend(field.row(y).iter().map(|&l| normalize_sample(l)));
        emitted += 1;
        if emitted == table_rows {
            break;
        }
    }

    log::debug!(
        "Assembled {} rows of {} samples (stride {})",
        emitted,
        frame_size,
        stride
    );

    Wavetable::from_whole_rows(frame_size, samples)
}
