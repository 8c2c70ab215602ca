use clap::Parser;
use std::path::PathBuf;

use wavetabler::config::Config;
use wavetabler::pipeline::{
    TableSettings, DEFAULT_FRAME_SIZE, DEFAULT_TABLE_ROWS, DEFAULT_TRIM_THRESHOLD,
};

#[derive(Parser, Debug)]
#[command(name = "wavetabler", about = "Turn an image into a 16-bit mono wavetable WAV")]
pub struct Cli {
    /// Input image (PNG, JPEG, BMP, ...)
    #[arg(default_value = "image.png")]
    pub input: PathBuf,

    /// Output wavetable file
    #[arg(short, long, default_value = "wavetable.wav")]
    pub output: PathBuf,

    /// Output for the polarity-inverted table. Defaults to <output stem>_inverted.wav
    #[arg(long)]
    pub inverted_output: Option<PathBuf>,

    /// Skip writing the inverted table
    #[arg(long)]
    pub no_inverted: bool,

    /// Samples per wavetable frame (one image row)
    #[arg(long, default_value_t = DEFAULT_FRAME_SIZE)]
    pub frame_size: usize,

    /// Number of frames in the table
    #[arg(long, default_value_t = DEFAULT_TABLE_ROWS)]
    pub rows: usize,

    /// Drop rows whose max-min spread does not exceed this value
    #[arg(long, default_value_t = DEFAULT_TRIM_THRESHOLD)]
    pub trim_threshold: u16,

    /// Keep every row
    #[arg(long)]
    pub no_trim: bool,

    /// Print per-row min/max/variance before trimming
    #[arg(long)]
    pub report: bool,

    /// Write the per-row report as JSON
    #[arg(long)]
    pub report_json: Option<PathBuf>,

    /// Read each written file back and compare it with the table
    #[arg(long)]
    pub verify: bool,

    /// Config file (defaults to ./wavetabler.toml or the user config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Suffix for the derived inverted file name
    #[arg(skip = String::from("_inverted"))]
    pub inverted_suffix: String,
}

impl Cli {
    /// Config values apply only where the CLI is still at its default.
    pub fn merge_config(&mut self, cfg: Config) {
        if self.frame_size == DEFAULT_FRAME_SIZE { self.frame_size = cfg.table.frame_size; }
        if self.rows == DEFAULT_TABLE_ROWS { self.rows = cfg.table.rows; }
        if self.trim_threshold == DEFAULT_TRIM_THRESHOLD {
            self.trim_threshold = cfg.table.trim_threshold;
        }
        if !self.no_trim { self.no_trim = !cfg.table.trim; }
        if !self.no_inverted { self.no_inverted = !cfg.output.inverted; }
        self.inverted_suffix = cfg.output.inverted_suffix;
    }

    pub fn table_settings(&self) -> TableSettings {
        TableSettings {
            frame_size: self.frame_size,
            table_rows: self.rows,
            trim_threshold: (!self.no_trim).then_some(self.trim_threshold),
        }
    }
}
