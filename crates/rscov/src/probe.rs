//! Probe identifier scheme: stable textual keys for injected probes.

use crate::traverse::FunctionRecord;
use std::fmt;

/// Key naming one probe: the function's declared name plus its source line.
///
/// Derivation is pure, so unchanged source always yields the same key and
/// reports stay diffable across runs. Two definitions sharing both name and
/// line (macro-duplicated code) collide by design; the runtime merges them
/// into one hit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProbeId {
    pub name: String,
    pub line: usize,
}

impl ProbeId {
    pub fn for_function(record: &FunctionRecord) -> Self {
        ProbeId {
            name: record.name.clone(),
            line: record.line,
        }
    }

    /// The persisted coverage key, `name:line`.
    pub fn key(&self) -> String {
        format!("{}:{}", self.name, self.line)
    }
}

impl fmt::Display for ProbeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.line)
    }
}

/// Flavor of probe text injected at a function entry.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeStyle {
    /// Record the probe in the coverage report via rscov-runtime
    Coverage,
    /// Print the function name to stderr on entry
    Trace,
}

impl ProbeStyle {
    /// The statement spliced in immediately after the body's opening brace.
    pub fn probe_text(self, id: &ProbeId) -> String {
        match self {
            ProbeStyle::Coverage => format!("rscov_runtime::hit(\"{}\");", id),
            ProbeStyle::Trace => format!("eprintln!(\"entered {}\");", id.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, line: usize) -> FunctionRecord {
        FunctionRecord {
            name: name.to_string(),
            line,
            body_open: proc_macro2::LineColumn { line, column: 0 },
        }
    }

    #[test]
    fn test_key_format() {
        let id = ProbeId::for_function(&record("a", 3));
        assert_eq!(id.key(), "a:3");
        assert_eq!(id.to_string(), "a:3");
    }

    #[test]
    fn test_derivation_is_stable() {
        let first = ProbeId::for_function(&record("handler", 42));
        let second = ProbeId::for_function(&record("handler", 42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_coverage_probe_text() {
        let id = ProbeId::for_function(&record("b", 10));
        assert_eq!(
            ProbeStyle::Coverage.probe_text(&id),
            "rscov_runtime::hit(\"b:10\");"
        );
    }

    #[test]
    fn test_trace_probe_text_omits_line() {
        let id = ProbeId::for_function(&record("b", 10));
        assert_eq!(ProbeStyle::Trace.probe_text(&id), "eprintln!(\"entered b\");");
    }
}
