//! Single-file mode, plus the per-unit driver shared with build mode.

use crate::compiledb::TranslationUnit;
use crate::error::{Error, Result};
use crate::instrument;
use crate::output::Placement;
use crate::probe::{ProbeId, ProbeStyle};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// What a run over a set of translation units produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub written: Vec<PathBuf>,
    pub skipped: usize,
    /// Distinct probe keys generated across all files.
    pub probes: BTreeSet<String>,
}

/// Drive the per-file pipeline over `units`.
///
/// A failure on one unit is reported on stderr and does not stop the
/// others; only conditions fatal to the whole run surface as `Err`. The
/// process exit status therefore reflects fatal conditions only.
pub fn run_units(
    units: &[TranslationUnit],
    style: ProbeStyle,
    placement: &Placement,
    manifest: Option<&Path>,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for unit in units {
        match instrument::instrument_file(&unit.path, style, placement) {
            Ok((output, probes)) => {
                eprintln!("{} -> {}", unit.path.display(), output.display());
                summary.probes.extend(probes.iter().map(ProbeId::key));
                summary.written.push(output);
            }
            Err(e) => {
                eprintln!("{}: skipped: {}", unit.path.display(), e);
                summary.skipped += 1;
            }
        }
    }

    if let Some(path) = manifest {
        write_manifest(path, &summary.probes)?;
        eprintln!("{} probes -> {}", summary.probes.len(), path.display());
    }
    eprintln!(
        "{} file(s) instrumented, {} skipped",
        summary.written.len(),
        summary.skipped
    );

    Ok(summary)
}

/// Run single-file mode over explicitly listed sources.
pub fn run(
    files: &[PathBuf],
    frontend_args: &[String],
    style: ProbeStyle,
    placement: &Placement,
    manifest: Option<&Path>,
) -> Result<()> {
    if files.is_empty() {
        return Err(Error::NoInputFiles("no source files given".to_string()));
    }
    if !frontend_args.is_empty() {
        eprintln!("frontend args: {}", frontend_args.join(" "));
    }

    let units: Vec<TranslationUnit> = files
        .iter()
        .map(|f| TranslationUnit {
            path: f.clone(),
            args: frontend_args.to_vec(),
        })
        .collect();

    run_units(&units, style, placement, manifest)?;
    Ok(())
}

/// Write all generated probe keys, one per line, sorted.
pub fn write_manifest(path: &Path, probes: &BTreeSet<String>) -> Result<()> {
    let mut body = String::with_capacity(probes.iter().map(|p| p.len() + 1).sum());
    for key in probes {
        body.push_str(key);
        body.push('\n');
    }
    std::fs::write(path, body).map_err(|e| Error::OutputPath {
        path: path.to_path_buf(),
        source: e,
    })
}
