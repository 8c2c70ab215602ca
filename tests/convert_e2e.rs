//! End-to-end tests: PNG on disk -> wavetable -> WAV on disk.

use image::{GrayImage, Luma, Rgb, RgbImage};
use std::path::Path;
use wavetabler::audio::{read_wavetable, write_wavetable, WavHeader, HEADER_LEN};
use wavetabler::{Converter, TableSettings, WavetableError};

fn settings(frame_size: usize, table_rows: usize, trim: Option<u16>) -> TableSettings {
    TableSettings {
        frame_size,
        table_rows,
        trim_threshold: trim,
    }
}

/// Horizontal gradient on every row, except `flat_rows` which are solid gray.
fn save_gradient(path: &Path, width: u32, height: u32, flat_rows: &[u32]) {
    let img = GrayImage::from_fn(width, height, |x, y| {
        if flat_rows.contains(&y) {
            Luma([128])
        } else {
            Luma([(x * 255 / (width - 1)) as u8])
        }
    });
    img.save(path).unwrap();
}

#[test]
fn test_png_to_full_table() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("gradient.png");
    save_gradient(&png, 300, 64, &[]);

    let converter = Converter::new(settings(128, 32, None)).unwrap();
    let conversion = converter.convert_file(&png).unwrap();

    assert_eq!(conversion.assembled_rows, 32);
    assert_eq!(conversion.trimmed_rows, 0);
    assert_eq!(conversion.table.sample_count(), 128 * 32);
    for row in conversion.table.rows() {
        assert_eq!(row[0], -32767);
        assert!(row[127] > 32000);
    }
}

#[test]
fn test_trim_drops_flat_rows() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("striped.png");
    // H=16, 8 rows => stride 2; sampled rows are 14, 12, ..., 0
    save_gradient(&png, 64, 16, &[0, 4, 14]);

    let converter = Converter::new(settings(64, 8, Some(3000))).unwrap();
    let conversion = converter.convert_file(&png).unwrap();

    assert_eq!(conversion.assembled_rows, 8);
    assert_eq!(conversion.trimmed_rows, 3);
    assert_eq!(conversion.table.row_count(), 5);
    assert!(conversion.table.row_stats().iter().all(|r| r.variance > 3000));
}

#[test]
fn test_uniform_color_image_trims_everything() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("solid.png");
    RgbImage::from_pixel(40, 20, Rgb([200, 30, 90])).save(&png).unwrap();

    let converter = Converter::new(settings(16, 10, Some(0))).unwrap();
    let conversion = converter.convert_file(&png).unwrap();

    assert_eq!(conversion.trimmed_rows, 10);
    assert!(conversion.table.is_empty());
}

#[test]
fn test_image_shorter_than_table_fails() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("short.png");
    save_gradient(&png, 32, 10, &[]);

    let converter = Converter::new(settings(16, 11, None)).unwrap();
    let err = converter.convert_file(&png).unwrap_err();
    assert!(matches!(err, WavetableError::ImageTooSmall { height: 10, table_rows: 11 }));
}

#[test]
fn test_corrupt_image_fails_decode() {
    let dir = tempfile::tempdir().unwrap();
    let bogus = dir.path().join("bogus.png");
    std::fs::write(&bogus, b"definitely not a png").unwrap();

    let converter = Converter::new(TableSettings::default()).unwrap();
    let err = converter.convert_file(&bogus).unwrap_err();
    assert!(matches!(err, WavetableError::DecodeFailure { .. }));
}

#[test]
fn test_written_header_matches_table() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("gradient.png");
    let wav = dir.path().join("table.wav");
    save_gradient(&png, 100, 40, &[]);

    let converter = Converter::new(settings(50, 20, None)).unwrap();
    let table = converter.convert_file(&png).unwrap().table;
    write_wavetable(&table, false, &wav).unwrap();

    let bytes = std::fs::read(&wav).unwrap();
    let header = WavHeader::parse(&bytes).unwrap();
    assert_eq!(header.data_size as usize, 20 * 50 * 2);
    assert_eq!(header.riff_size, 36 + header.data_size);
    assert_eq!(header.num_channels, 1);
    assert_eq!(header.sample_rate, 44100);
    assert_eq!(header.bits_per_sample, 16);
    assert_eq!(header.byte_rate, 88200);
    assert_eq!(bytes.len(), HEADER_LEN + header.data_size as usize);
}

#[test]
fn test_forward_and_inverted_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("gradient.png");
    let forward = dir.path().join("wavetable.wav");
    let inverted = dir.path().join("wavetable_inverted.wav");
    save_gradient(&png, 80, 24, &[]);

    let converter = Converter::new(settings(32, 12, Some(3000))).unwrap();
    let table = converter.convert_file(&png).unwrap().table;
    write_wavetable(&table, false, &forward).unwrap();
    write_wavetable(&table, true, &inverted).unwrap();

    assert_eq!(read_wavetable(&forward, 32).unwrap(), table);

    let mut back = read_wavetable(&inverted, 32).unwrap();
    assert_eq!(back.samples()[0], -table.samples()[0]);
    back.invert_in_place();
    assert_eq!(back, table);
}

#[test]
fn test_unwritable_destination_is_write_failure() {
    let dir = tempfile::tempdir().unwrap();
    let table = wavetabler::Wavetable::from_samples(2, vec![1, -1]).unwrap();
    let target = dir.path().join("missing_dir").join("table.wav");

    let err = write_wavetable(&table, false, &target).unwrap_err();
    assert!(matches!(err, WavetableError::WriteFailure { .. }));

    // an independent write still succeeds
    let ok = dir.path().join("table.wav");
    write_wavetable(&table, true, &ok).unwrap();
}

#[test]
fn test_split_path_matches_convert_file() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("striped.png");
    save_gradient(&png, 64, 16, &[2, 8]);

    let converter = Converter::new(settings(32, 8, Some(3000))).unwrap();
    let mut table = converter.process_file(&png).unwrap();
    assert_eq!(table.row_count(), 8);
    let removed = converter.trim(&mut table);

    let conversion = converter.convert_file(&png).unwrap();
    assert_eq!(removed, conversion.trimmed_rows);
    assert_eq!(removed, 2);
    assert_eq!(table, conversion.table);
}
