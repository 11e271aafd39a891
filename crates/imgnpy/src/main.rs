//! imgnpy CLI - Convert every image in a folder into a NumPy `.npy` file.
//!
//! Each `.png`, `.jpg`, `.jpeg`, `.bmp`, `.tiff` or `.gif` file directly
//! inside the folder is saved next to the original as `<name>.npy`.
//!
//! # Usage
//!
//! ```bash
//! # Plain conversion
//! imgnpy ./images
//!
//! # Grayscale, resized to 512x512
//! imgnpy ./images --grayscale --resize
//!
//! # With an explicit config file and debug logging
//! imgnpy ./images --config ~/imgnpy.toml -v
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

mod cli;
mod logging;

/// Convert all images in a folder to .npy files.
#[derive(Parser, Debug)]
#[command(name = "imgnpy")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    convert: cli::convert::ConvertArgs,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json_logs: bool,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config problems go to stderr directly.
    let config = load_config(cli.config.as_deref())?;
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("imgnpy v{}", imgnpy_core::VERSION);

    cli::convert::execute(cli.convert, &config)
}

/// Load an explicitly requested config file, or the default one.
///
/// An explicit file that fails to load is fatal. A broken default file only
/// produces a warning and the built-in defaults are used.
fn load_config(explicit: Option<&str>) -> anyhow::Result<imgnpy_core::Config> {
    if let Some(raw) = explicit {
        let path = PathBuf::from(shellexpand::tilde(raw).into_owned());
        return imgnpy_core::Config::load_from(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    match imgnpy_core::Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config from {}: {e}\n  Using default configuration.",
                imgnpy_core::Config::default_path().display()
            );
            Ok(imgnpy_core::Config::default())
        }
    }
}
