//! Folder conversion: argument handling and console reporting.

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use imgnpy_core::config::ConvertConfig;
use imgnpy_core::{Config, ConvertOptions, Converter};

/// Arguments for converting a folder.
#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// Path to the folder containing images
    #[arg(value_name = "FOLDER_PATH")]
    pub folder_path: PathBuf,

    /// Convert images to grayscale before saving as .npy
    #[arg(short, long)]
    pub grayscale: bool,

    /// Resize images to 512x512 before saving as .npy
    #[arg(short, long)]
    pub resize: bool,
}

impl ConvertArgs {
    /// Merge CLI flags with config defaults. A flag can only switch a
    /// transform on.
    pub fn options(&self, defaults: &ConvertConfig) -> ConvertOptions {
        ConvertOptions {
            grayscale: self.grayscale || defaults.grayscale,
            resize: self.resize || defaults.resize,
        }
    }
}

/// Execute the conversion, printing status lines to stdout.
pub fn execute(args: ConvertArgs, config: &Config) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&args, config, &mut out)
}

/// Convert `args.folder_path`, writing one line per candidate to `out`.
///
/// A missing folder is reported on `out` and still returns `Ok`; only a
/// failure to write the report itself is an error.
pub(crate) fn run<W: Write>(
    args: &ConvertArgs,
    config: &Config,
    out: &mut W,
) -> anyhow::Result<()> {
    let converter = Converter::new(config);

    let candidates = match converter.discover(&args.folder_path) {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::debug!("Aborting run: {e:?}");
            writeln!(out, "Error: {e}")?;
            return Ok(());
        }
    };
    if candidates.is_empty() {
        writeln!(out, "No image files found in the provided folder.")?;
        return Ok(());
    }

    let options = args.options(&config.convert);
    tracing::info!(
        "Found {} image(s) to convert (grayscale: {}, resize: {})",
        candidates.len(),
        options.grayscale,
        options.resize
    );

    let start = Instant::now();
    let mut write_result: std::io::Result<()> = Ok(());
    let report = converter.convert_all(&candidates, &options, |outcome| {
        if write_result.is_ok() {
            write_result = writeln!(out, "{outcome}");
        }
    });
    write_result?;
    out.flush()?;

    tracing::info!(
        "Converted {} of {} image(s) in {:.1}s",
        report.saved(),
        report.outcomes.len(),
        start.elapsed().as_secs_f64()
    );
    if report.failed() > 0 {
        tracing::warn!("{} image(s) failed", report.failed());
    }

    Ok(())
}
