//! Pipeline orchestration - wires together all conversion stages.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::{CollisionPolicy, Config};
use crate::error::{PipelineError, PipelineResult};
use crate::types::{BatchReport, ConversionOutcome, SavedArray};

use super::array::ImageArray;
use super::decode::ImageDecoder;
use super::discovery::{Candidate, FileDiscovery};
use super::npy;
use super::transform::Transformer;

/// Per-run conversion switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Convert to single-channel luma unless already single-channel
    pub grayscale: bool,
    /// Resample to exactly 512x512
    pub resize: bool,
}

/// The main converter that orchestrates the full pipeline.
pub struct Converter {
    discovery: FileDiscovery,
    decoder: ImageDecoder,
    transformer: Transformer,
    on_collision: CollisionPolicy,
}

impl Converter {
    /// Create a new converter with the given configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            discovery: FileDiscovery::new(&config.discovery),
            decoder: ImageDecoder::new(config.limits.clone()),
            transformer: Transformer::new(&config.convert),
            on_collision: config.convert.on_collision,
        }
    }

    /// Find the candidates directly inside `folder`.
    pub fn discover(&self, folder: &Path) -> PipelineResult<Vec<Candidate>> {
        self.discovery.discover(folder)
    }

    /// Convert one candidate: decode, transform, extract, write.
    pub fn convert_file(
        &self,
        candidate: &Candidate,
        options: &ConvertOptions,
    ) -> PipelineResult<SavedArray> {
        let path = candidate.path.as_path();
        let start = std::time::Instant::now();
        tracing::debug!("Processing: {:?}", path);

        let decoded = self.decoder.decode(path)?;
        tracing::trace!(
            "  Decode: {:?} ({} bytes, {:?})",
            start.elapsed(),
            decoded.file_size,
            decoded.format
        );

        let transform_start = std::time::Instant::now();
        let image = self.transformer.apply(decoded.image, options);
        tracing::trace!("  Transform: {:?}", transform_start.elapsed());

        let array = ImageArray::from_image(image).map_err(|e| PipelineError::Array {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let output = candidate.output_path();
        let write_start = std::time::Instant::now();
        npy::write_array(&output, &array).map_err(|e| PipelineError::Write {
            path: output.clone(),
            message: e.to_string(),
        })?;
        tracing::trace!("  Write: {:?}", write_start.elapsed());

        tracing::debug!(
            "Converted {:?} in {:?} (shape {:?}, {})",
            candidate.file_name,
            start.elapsed(),
            array.shape(),
            array.dtype()
        );

        Ok(SavedArray {
            output,
            shape: array.shape().to_vec(),
            dtype: array.dtype(),
        })
    }

    /// Convert every candidate in order.
    ///
    /// A failing candidate is recorded and the run moves on. `on_outcome` is
    /// called as soon as each candidate finishes.
    pub fn convert_all<F>(
        &self,
        candidates: &[Candidate],
        options: &ConvertOptions,
        mut on_outcome: F,
    ) -> BatchReport
    where
        F: FnMut(&ConversionOutcome),
    {
        let mut report = BatchReport::default();
        // output path -> candidate that wrote it
        let mut written: HashMap<PathBuf, PathBuf> = HashMap::new();

        for candidate in candidates {
            let outcome = match self.check_collision(candidate, &written) {
                Err(error) => ConversionOutcome::Failed {
                    candidate: candidate.clone(),
                    error,
                },
                Ok(()) => match self.convert_file(candidate, options) {
                    Ok(saved) => {
                        written.insert(saved.output.clone(), candidate.path.clone());
                        ConversionOutcome::Saved {
                            candidate: candidate.clone(),
                            saved,
                        }
                    }
                    Err(error) => {
                        tracing::debug!("Failed: {:?} - {}", candidate.path, error);
                        ConversionOutcome::Failed {
                            candidate: candidate.clone(),
                            error,
                        }
                    }
                },
            };

            on_outcome(&outcome);
            report.outcomes.push(outcome);
        }

        report
    }

    /// Discover and convert every candidate in `folder`.
    ///
    /// Only folder-level problems are returned as errors; per-file failures
    /// are part of the report.
    pub fn convert_folder<F>(
        &self,
        folder: &Path,
        options: &ConvertOptions,
        on_outcome: F,
    ) -> PipelineResult<BatchReport>
    where
        F: FnMut(&ConversionOutcome),
    {
        let candidates = self.discover(folder)?;
        Ok(self.convert_all(&candidates, options, on_outcome))
    }

    /// Apply the collision policy before a candidate is processed.
    fn check_collision(
        &self,
        candidate: &Candidate,
        written: &HashMap<PathBuf, PathBuf>,
    ) -> PipelineResult<()> {
        let output = candidate.output_path();
        let Some(previous) = written.get(&output) else {
            return Ok(());
        };

        match self.on_collision {
            CollisionPolicy::Overwrite => {
                tracing::warn!(
                    "{:?} overwrites {:?} written from {:?}",
                    candidate.file_name,
                    output,
                    previous
                );
                Ok(())
            }
            CollisionPolicy::Reject => Err(PipelineError::OutputCollision {
                path: candidate.path.clone(),
                output,
                previous: previous.clone(),
            }),
        }
    }
}
