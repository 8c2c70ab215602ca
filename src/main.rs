mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;

use cli::Cli;
use wavetabler::audio::{read_wavetable, write_wavetable};
use wavetabler::config;
use wavetabler::wavetable::RowReport;
use wavetabler::{Converter, Wavetable};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();

    if let Some(ref path) = config::discover_config(cli.config.as_deref()) {
        match config::load_config(path) {
            Ok(cfg) => {
                log::info!("Loaded config from {}", path.display());
                cli.merge_config(cfg);
            }
            Err(err) => log::warn!("{:#}", err),
        }
    }

    let settings = cli.table_settings();
    let converter = Converter::new(settings).context("Invalid table settings")?;

    log::info!("wavetabler - image to wavetable");
    log::info!("Input: {}", cli.input.display());
    log::info!(
        "Table: {} rows x {} samples, trim {}",
        settings.table_rows,
        settings.frame_size,
        settings
            .trim_threshold
            .map_or_else(|| "off".to_string(), |t| format!("<= {}", t))
    );

    // 1. Decode and assemble the untrimmed table
    let mut table = converter
        .process_file(&cli.input)
        .with_context(|| format!("Image loader unable to process file: {}", cli.input.display()))?;

    // 2. Diagnostics
    if cli.report || cli.report_json.is_some() {
        report_rows(&table, cli.report, cli.report_json.as_deref(), settings.trim_threshold);
    }

    // 3. Trim
    let removed = converter.trim(&mut table);
    if let Some(threshold) = settings.trim_threshold {
        println!("Trimmed {} rows under {} variance.", removed, threshold);
    }
    if table.is_empty() {
        log::warn!("Every row was trimmed; output files will contain no samples");
    }

    // 4. Write outputs; each one succeeds or fails on its own
    let mut outputs = vec![(cli.output.clone(), false)];
    if !cli.no_inverted {
        let inverted = cli
            .inverted_output
            .clone()
            .unwrap_or_else(|| config::inverted_path(&cli.output, &cli.inverted_suffix));
        outputs.push((inverted, true));
    }

    let mut failures = 0;
    for (path, invert) in &outputs {
        if let Err(err) = write_output(&table, *invert, path, cli.verify) {
            log::error!("{:#}", err);
            failures += 1;
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} output file(s) failed", failures, outputs.len());
    }

    println!(
        "Created {} file(s) with {} rows of {} samples each",
        outputs.len(),
        table.row_count(),
        table.frame_size()
    );
    Ok(())
}

/// Diagnostic only: a failed JSON write is logged and the job carries on.
fn report_rows(table: &Wavetable, print: bool, json: Option<&Path>, threshold: Option<u16>) {
    let report = RowReport::new(table);
    if print {
        print!("{}", report);
    }
    if let Some(threshold) = threshold {
        log::info!(
            "{} of {} rows at or below variance {}",
            report.quiet_rows(threshold),
            report.rows.len(),
            threshold
        );
    }
    if let Some(path) = json {
        if let Err(err) = report.write_json(path) {
            log::error!("{:#}", err);
        }
    }
}

fn write_output(table: &Wavetable, invert: bool, path: &Path, verify: bool) -> Result<()> {
    write_wavetable(table, invert, path)?;
    if !verify {
        return Ok(());
    }
    if table.is_empty() {
        log::warn!("Skipping verification of empty table {}", path.display());
        return Ok(());
    }

    let mut written = read_wavetable(path, table.frame_size())?;
    if invert {
        written.invert_in_place();
    }
    if written != *table {
        anyhow::bail!("Verification failed: {} does not match the table", path.display());
    }
    log::info!("Verified {}", path.display());
    Ok(())
}
