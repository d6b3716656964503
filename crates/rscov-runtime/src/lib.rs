//! Runtime library for rscov-instrumented programs.
//!
//! The instrumenter rewrites every function body to open with a call to
//! [`hit`], passing a probe identifier of the form `"name:line"`. This crate
//! collects the identifiers that were actually reached and writes them to a
//! report file, one per line, sorted, when [`dump`] runs.
//!
//! # Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! rscov-runtime = "0.1"
//! ```
//!
//! Then make sure the report is written on normal termination, either by
//! calling [`dump`] before returning from `main`:
//! ```rust,ignore
//! fn main() {
//!     run();
//!     rscov_runtime::dump();
//! }
//! ```
//! or by holding a [`DumpGuard`] for the duration of `main`:
//! ```rust,ignore
//! fn main() {
//!     let _cov = rscov_runtime::dump_on_exit();
//!     run();
//! }
//! ```
//!
//! The report path defaults to `coverage.txt` in the working directory and
//! can be overridden with the `RSCOV_REPORT` environment variable. Each run
//! overwrites any previous report.

use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once, OnceLock};

/// Environment variable overriding the report path.
pub const REPORT_ENV: &str = "RSCOV_REPORT";

/// Report path used when `RSCOV_REPORT` is not set.
pub const DEFAULT_REPORT: &str = "coverage.txt";

/// Records which probe identifiers were reached during execution.
///
/// The set is guarded by a mutex; `dump` takes the same lock, so a dump
/// observes a consistent snapshot and no `record` racing it is lost.
pub struct HitRecorder {
    hits: Mutex<BTreeSet<String>>,
    report_path: PathBuf,
}

impl HitRecorder {
    /// Create a recorder that will write its report to `report_path`.
    pub fn new(report_path: impl Into<PathBuf>) -> Self {
        HitRecorder {
            hits: Mutex::new(BTreeSet::new()),
            report_path: report_path.into(),
        }
    }

    /// Record one probe hit. Recording the same identifier again is a no-op.
    pub fn record(&self, id: &str) {
        let mut hits = self.hits.lock().unwrap_or_else(|e| e.into_inner());
        if !hits.contains(id) {
            hits.insert(id.to_owned());
        }
    }

    /// Number of distinct identifiers recorded so far.
    pub fn len(&self) -> usize {
        self.hits.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Where the report will be written.
    pub fn report_path(&self) -> &Path {
        &self.report_path
    }

    /// Write the report: one identifier per line, sorted, no header.
    ///
    /// Truncates any existing report at the same path. The hit set stays
    /// locked for the duration of the write.
    pub fn dump(&self) -> io::Result<()> {
        let hits = self.hits.lock().unwrap_or_else(|e| e.into_inner());
        let mut out = Vec::with_capacity(hits.iter().map(|h| h.len() + 1).sum());
        for id in hits.iter() {
            out.extend_from_slice(id.as_bytes());
            out.push(b'\n');
        }
        let mut file = std::fs::File::create(&self.report_path)?;
        file.write_all(&out)?;
        file.flush()
    }
}

static RECORDER: OnceLock<HitRecorder> = OnceLock::new();
static DUMPED: Once = Once::new();

fn recorder() -> &'static HitRecorder {
    RECORDER.get_or_init(|| {
        let path = std::env::var_os(REPORT_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT));
        HitRecorder::new(path)
    })
}

/// Record a probe hit against the process-wide recorder.
///
/// This is the call the instrumenter injects at every function entry. Safe
/// to call from any thread.
pub fn hit(id: &str) {
    recorder().record(id);
}

/// Write the process-wide coverage report.
///
/// Runs at most once per process; later calls are no-ops. A write failure
/// is reported on stderr rather than panicking inside an exiting program.
pub fn dump() {
    DUMPED.call_once(|| {
        let rec = recorder();
        if let Err(e) = rec.dump() {
            eprintln!(
                "rscov-runtime: cannot write {}: {}",
                rec.report_path().display(),
                e
            );
        }
    });
}

/// Calls [`dump`] when dropped.
///
/// Hold one at the top of `main` so the report is written on any normal
/// return path, including early returns and unwinding panics.
#[must_use = "the report is written when the guard is dropped"]
pub struct DumpGuard(());

impl Drop for DumpGuard {
    fn drop(&mut self) {
        dump();
    }
}

/// Arrange for the report to be written at scope exit.
pub fn dump_on_exit() -> DumpGuard {
    DumpGuard(())
}
