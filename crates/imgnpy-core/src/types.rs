//! Result types for a conversion run.
//!
//! Each candidate produces exactly one [`ConversionOutcome`]; a run collects
//! them, in processing order, into a [`BatchReport`].

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::PipelineError;
use crate::pipeline::Candidate;

/// A successfully written array file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArray {
    /// Path of the `.npy` file
    pub output: PathBuf,

    /// Array shape, `[h, w]` or `[h, w, c]`
    pub shape: Vec<usize>,

    /// NumPy dtype name ("uint8", "uint16", "float32")
    pub dtype: &'static str,
}

/// What happened to a single candidate.
#[derive(Debug)]
pub enum ConversionOutcome {
    /// The array was written
    Saved {
        candidate: Candidate,
        saved: SavedArray,
    },

    /// Processing stopped at some stage; nothing was written for this file
    Failed {
        candidate: Candidate,
        error: PipelineError,
    },
}

impl ConversionOutcome {
    /// The candidate this outcome belongs to.
    pub fn candidate(&self) -> &Candidate {
        match self {
            Self::Saved { candidate, .. } | Self::Failed { candidate, .. } => candidate,
        }
    }

    /// Path of the source image.
    pub fn source(&self) -> &Path {
        &self.candidate().path
    }

    /// File name of the source image, as listed in its folder.
    pub fn file_name(&self) -> &str {
        &self.candidate().file_name
    }

    /// True when an output file was written.
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// Renders the console status line: `Saved: <path>` or
/// `Failed to process <name>: <reason>`.
impl fmt::Display for ConversionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Saved { saved, .. } => write!(f, "Saved: {}", saved.output.display()),
            Self::Failed { error, .. } => {
                write!(f, "Failed to process {}: {}", self.file_name(), error)
            }
        }
    }
}

/// Ordered outcomes of a run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<ConversionOutcome>,
}

impl BatchReport {
    /// Number of candidates that produced an output file.
    pub fn saved(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_saved()).count()
    }

    /// Number of candidates that failed.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.saved()
    }

    /// True when the run had no candidates at all.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
