//! Output placement: where rewritten files land.
//!
//! Either strategy must derive a path that never coincides with the input,
//! so originals cannot be overwritten, and must be idempotent: a second run
//! overwrites the same output instead of accumulating copies.

use crate::error::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// Marker spliced before the extension in suffix mode.
pub const DEFAULT_SUFFIX: &str = "_instrumented";

/// Strategy for deriving an output path from an input path.
#[derive(Debug, Clone)]
pub enum Placement {
    /// Same directory, `stem{marker}.ext`.
    Suffix { marker: String },
    /// Dedicated output root mirroring the input path, directories created
    /// on demand. Absolute inputs mirror by filename only.
    Root { dir: PathBuf },
}

impl Placement {
    /// Derive the output path for `input`, creating intermediate directories
    /// in `Root` mode.
    pub fn resolve(&self, input: &Path) -> Result<PathBuf> {
        let output = match self {
            Placement::Suffix { marker } => {
                let stem = input
                    .file_stem()
                    .ok_or_else(|| bad_input(input))?
                    .to_string_lossy();
                let name = match input.extension() {
                    Some(ext) => format!("{}{}.{}", stem, marker, ext.to_string_lossy()),
                    None => format!("{}{}", stem, marker),
                };
                input.with_file_name(name)
            }
            Placement::Root { dir } => {
                let mirrored = if input.is_absolute() {
                    PathBuf::from(input.file_name().ok_or_else(|| bad_input(input))?)
                } else {
                    // Keep relative structure, dropping any leading `..`.
                    input
                        .components()
                        .filter(|c| matches!(c, Component::Normal(_)))
                        .collect()
                };
                let output = dir.join(mirrored);
                if let Some(parent) = output.parent() {
                    std::fs::create_dir_all(parent).map_err(|e| Error::OutputPath {
                        path: parent.to_path_buf(),
                        source: e,
                    })?;
                }
                output
            }
        };

        if collides(&output, input) {
            return Err(Error::InvalidArgument(format!(
                "output path equals input path: {}",
                output.display()
            )));
        }
        Ok(output)
    }
}

fn bad_input(input: &Path) -> Error {
    Error::InvalidArgument(format!("not a file path: {}", input.display()))
}

/// Whether `output` names the same file as `input`.
///
/// Syntactic equality alone is defeatable: `.`, `..` and symlinks let two
/// spellings alias one file (`--out-dir .` turns `main.rs` into
/// `./main.rs`). When the input exists on disk, compare canonical forms.
fn collides(output: &Path, input: &Path) -> bool {
    if output == input {
        return true;
    }
    let Ok(input) = input.canonicalize() else {
        // Input missing or unreadable; the pipeline fails on read anyway.
        return false;
    };
    canonical(output).map(|out| out == input).unwrap_or(false)
}

/// Canonical form of a path whose final component may not exist yet:
/// canonicalize the parent and re-attach the file name.
fn canonical(path: &Path) -> Option<PathBuf> {
    if let Ok(p) = path.canonicalize() {
        return Some(p);
    }
    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.canonicalize().ok()?,
        _ => Path::new(".").canonicalize().ok()?,
    };
    Some(parent.join(name))
}
