use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::pipeline::{DEFAULT_FRAME_SIZE, DEFAULT_TABLE_ROWS, DEFAULT_TRIM_THRESHOLD};

pub const CONFIG_FILE_NAME: &str = "wavetabler.toml";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct TableConfig {
    #[serde(default = "default_frame_size")]
    pub frame_size: usize,
    #[serde(default = "default_rows")]
    pub rows: usize,
    #[serde(default = "default_trim_threshold")]
    pub trim_threshold: u16,
    #[serde(default = "default_true")]
    pub trim: bool,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Also write a polarity-inverted copy
    #[serde(default = "default_true")]
    pub inverted: bool,
    #[serde(default = "default_inverted_suffix")]
    pub inverted_suffix: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            frame_size: default_frame_size(),
            rows: default_rows(),
            trim_threshold: default_trim_threshold(),
            trim: default_true(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            inverted: default_true(),
            inverted_suffix: default_inverted_suffix(),
        }
    }
}

fn default_frame_size() -> usize { DEFAULT_FRAME_SIZE }
fn default_rows() -> usize { DEFAULT_TABLE_ROWS }
fn default_trim_threshold() -> u16 { DEFAULT_TRIM_THRESHOLD }
fn default_true() -> bool { true }
fn default_inverted_suffix() -> String { "_inverted".into() }

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))
}

/// Explicit path first, then `./wavetabler.toml`, `~/.config/wavetabler/config.toml`
/// and finally the platform config directory.
pub fn discover_config(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    if let Some(home) = dirs::home_dir() {
        let xdg = home.join(".config").join("wavetabler").join("config.toml");
        if xdg.exists() {
            return Some(xdg);
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        let platform = config_dir.join("wavetabler").join("config.toml");
        if platform.exists() {
            return Some(platform);
        }
    }
    None
}

/// `<stem><suffix>.wav` next to the forward output.
pub fn inverted_path(output: &Path, suffix: &str) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "wavetable".into());
    let ext = output
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "wav".into());
    output.with_file_name(format!("{}{}.{}", stem, suffix, ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.table.frame_size, 1024);
        assert_eq!(cfg.table.rows, 256);
        assert_eq!(cfg.table.trim_threshold, 3000);
        assert!(cfg.table.trim);
        assert!(cfg.output.inverted);
        assert_eq!(cfg.output.inverted_suffix, "_inverted");
    }

    #[test]
    fn partial_tables_fill_in() {
        let cfg: Config = toml::from_str(
            r#"
            [table]
            rows = 64
            trim = false

            [output]
            inverted = false
            "#,
        )
        .unwrap();
        assert_eq!(cfg.table.rows, 64);
        assert_eq!(cfg.table.frame_size, 1024);
        assert!(!cfg.table.trim);
        assert!(!cfg.output.inverted);
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[table]\nrows = \"many\"").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn inverted_path_keeps_directory() {
        let p = inverted_path(Path::new("out/wavetable.wav"), "_inverted");
        assert_eq!(p, PathBuf::from("out/wavetable_inverted.wav"));
        let bare = inverted_path(Path::new("table"), "-neg");
        assert_eq!(bare, PathBuf::from("table-neg.wav"));
    }

    #[test]
    fn explicit_config_wins() {
        let p = discover_config(Some(Path::new("custom.toml")));
        assert_eq!(p, Some(PathBuf::from("custom.toml")));
    }
}
