//! Per-file pipeline: parse, locate functions, splice probes, place output.

use crate::error::{Error, Result};
use crate::output::Placement;
use crate::probe::{ProbeId, ProbeStyle};
use crate::rewrite::{self, Edit};
use crate::srcmap::LineIndex;
use crate::traverse;
use std::path::{Path, PathBuf};

/// Result of instrumenting one source buffer.
#[derive(Debug)]
pub struct Instrumented {
    /// Rewritten source text
    pub text: String,
    /// Generated probe ids, in document order
    pub probes: Vec<ProbeId>,
}

/// Instrument a source buffer: one probe spliced in immediately after each
/// function body's opening brace.
///
/// The probe executes before any user statement whenever the function is
/// entered. A file with no function definitions comes back byte-identical.
pub fn instrument_source(source: &str, style: ProbeStyle) -> Result<Instrumented> {
    let file = syn::parse_file(source).map_err(|e| Error::Parse(e.to_string()))?;
    let index = LineIndex::new(source);
    let records = traverse::functions(&file);

    let mut edits = Vec::with_capacity(records.len());
    let mut probes = Vec::with_capacity(records.len());
    for record in &records {
        let offset = index.offset(source, record.body_open)?;
        let id = ProbeId::for_function(record);
        edits.push(Edit::new(offset, format!(" {}", style.probe_text(&id))));
        probes.push(id);
    }

    let text = rewrite::apply(source, &edits)?;
    Ok(Instrumented { text, probes })
}

/// Instrument one file on disk, writing the rewritten copy where `placement`
/// says. Returns the output path and the generated probe ids.
pub fn instrument_file(
    input: &Path,
    style: ProbeStyle,
    placement: &Placement,
) -> Result<(PathBuf, Vec<ProbeId>)> {
    let source = std::fs::read_to_string(input)?;
    let done = instrument_source(&source, style)?;
    let output = placement.resolve(input)?;
    std::fs::write(&output, &done.text).map_err(|e| Error::OutputPath {
        path: output.clone(),
        source: e,
    })?;
    Ok((output, done.probes))
}
