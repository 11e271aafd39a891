//! Candidate discovery: the image files sitting directly inside a folder.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::DiscoveryConfig;
use crate::error::{PipelineError, PipelineResult};

/// File extension of the array files written next to each image.
pub const NPY_EXTENSION: &str = "npy";

/// Finds convertible images in a single folder level.
pub struct FileDiscovery {
    /// Lowercased suffixes including the leading dot, e.g. `.png`
    suffixes: Vec<String>,
}

/// An image file selected for conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Full path to the file
    pub path: PathBuf,
    /// File name as listed in the folder
    pub file_name: String,
}

impl Candidate {
    /// Build a candidate from a path, taking the name from its last component.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, file_name }
    }

    /// Path of the `.npy` file this candidate converts to.
    ///
    /// Only the last extension is replaced, so `scan.v2.png` becomes
    /// `scan.v2.npy` and a bare `.png` becomes `.png.npy`.
    pub fn output_path(&self) -> PathBuf {
        self.path.with_extension(NPY_EXTENSION)
    }
}

impl FileDiscovery {
    /// Create a new discovery instance for the configured extensions.
    pub fn new(config: &DiscoveryConfig) -> Self {
        let suffixes = config
            .extensions
            .iter()
            .map(|ext| format!(".{}", ext.trim_start_matches('.').to_lowercase()))
            .collect();
        Self { suffixes }
    }

    /// List the candidates directly inside `folder`, sorted by file name.
    ///
    /// Subdirectories are never candidates and are not descended into.
    /// Entries whose type cannot be read, such as dangling symlinks, are
    /// kept when their name matches. Fails only when `folder` is not a
    /// listable directory.
    pub fn discover(&self, folder: &Path) -> PipelineResult<Vec<Candidate>> {
        if !folder.is_dir() {
            return Err(PipelineError::FolderNotFound(folder.to_path_buf()));
        }

        let mut candidates = Vec::new();

        for entry in WalkDir::new(folder)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(PipelineError::ReadDir {
                        path: folder.to_path_buf(),
                        message: e.to_string(),
                    });
                }
                Err(e) => {
                    // A dangling link still counts; decoding reports why it failed.
                    if let Some(path) = e.path() {
                        let candidate = Candidate::from_path(path);
                        if self.is_supported(&candidate.file_name) {
                            tracing::debug!("Keeping unreadable entry {:?}: {}", path, e);
                            candidates.push(candidate);
                            continue;
                        }
                    }
                    tracing::warn!("Skipping unreadable entry in {:?}: {}", folder, e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if self.is_supported(&name) {
                candidates.push(Candidate {
                    path: entry.path().to_path_buf(),
                    file_name: name.into_owned(),
                });
            }
        }

        candidates.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        tracing::debug!("Found {} candidate(s) in {:?}", candidates.len(), folder);
        Ok(candidates)
    }

    /// Check if a file name ends with a recognized extension (case-insensitive).
    fn is_supported(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        self.suffixes.iter().any(|suffix| lower.ends_with(suffix))
    }
}
