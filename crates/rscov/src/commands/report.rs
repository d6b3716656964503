//! Inspect a coverage report written by an instrumented run.

use crate::error::Result;
use std::collections::BTreeSet;
use std::path::Path;

/// Hit/miss breakdown of a report against a probe manifest.
#[derive(Debug, PartialEq, Eq)]
pub struct Summary {
    pub hit: usize,
    pub total: usize,
    pub missed: Vec<String>,
}

impl Summary {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.hit as f64 * 100.0 / self.total as f64
        }
    }
}

/// Compare observed hits against the full probe set.
///
/// Hits outside the manifest (stale report, renamed functions) are ignored
/// rather than counted.
pub fn summarize(hits: &BTreeSet<String>, all: &BTreeSet<String>) -> Summary {
    Summary {
        hit: all.intersection(hits).count(),
        total: all.len(),
        missed: all.difference(hits).cloned().collect(),
    }
}

fn read_id_lines(path: &Path) -> Result<BTreeSet<String>> {
    let body = std::fs::read_to_string(path)?;
    Ok(body
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect())
}

/// Run the report command.
pub fn run(report: &Path, manifest: Option<&Path>) -> Result<()> {
    let hits = read_id_lines(report)?;
    println!("{} probe(s) hit", hits.len());

    if let Some(manifest) = manifest {
        let all = read_id_lines(manifest)?;
        let summary = summarize(&hits, &all);
        println!(
            "{}/{} functions covered ({:.1}%)",
            summary.hit,
            summary.total,
            summary.percent()
        );
        for id in &summary.missed {
            println!("MISS {}", id);
        }
    }

    Ok(())
}
