//! Build description loading.
//!
//! A build is described by a `compile_commands.json`-style document: an
//! array of entries naming a source file and the arguments used to compile
//! it. The content is opaque to us beyond resolving file paths; arguments
//! ride along untouched for the frontend.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name of the build description inside the build directory.
pub const BUILD_DB_NAME: &str = "compile_commands.json";

/// One raw entry of the build description.
#[derive(Debug, Clone, Deserialize)]
pub struct CompileCommand {
    pub file: PathBuf,
    #[serde(default)]
    pub directory: Option<PathBuf>,
    /// Argument-vector form.
    #[serde(default)]
    pub arguments: Vec<String>,
    /// Single-string command form; split on whitespace when `arguments` is
    /// absent.
    #[serde(default)]
    pub command: Option<String>,
}

/// One source file to instrument, with its effective compile arguments.
#[derive(Debug, Clone)]
pub struct TranslationUnit {
    pub path: PathBuf,
    pub args: Vec<String>,
}

impl TranslationUnit {
    pub fn bare(path: impl Into<PathBuf>) -> Self {
        TranslationUnit {
            path: path.into(),
            args: Vec::new(),
        }
    }
}

/// Load `<build_dir>/compile_commands.json` and resolve it to translation
/// units.
///
/// Fatal when the description cannot be read or parsed, and when it resolves
/// to zero Rust sources.
pub fn load(build_dir: &Path) -> Result<Vec<TranslationUnit>> {
    let db_path = build_dir.join(BUILD_DB_NAME);
    let data = std::fs::read_to_string(&db_path)
        .map_err(|e| Error::BuildDescription(format!("{}: {}", db_path.display(), e)))?;
    let entries: Vec<CompileCommand> = serde_json::from_str(&data)
        .map_err(|e| Error::BuildDescription(format!("{}: {}", db_path.display(), e)))?;

    let mut units = Vec::new();
    for entry in entries {
        let path = match &entry.directory {
            Some(dir) if entry.file.is_relative() => dir.join(&entry.file),
            _ => entry.file.clone(),
        };
        if path.extension().map(|e| e == "rs").unwrap_or(false) {
            units.push(TranslationUnit {
                path,
                args: entry.effective_args(),
            });
        }
    }

    if units.is_empty() {
        return Err(Error::NoInputFiles(format!(
            "{} resolved to zero Rust sources",
            db_path.display()
        )));
    }
    Ok(units)
}

impl CompileCommand {
    fn effective_args(&self) -> Vec<String> {
        if !self.arguments.is_empty() {
            return self.arguments.clone();
        }
        self.command
            .as_deref()
            .map(|c| c.split_whitespace().map(String::from).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_db(dir: &Path, body: &str) {
        std::fs::write(dir.join(BUILD_DB_NAME), body).unwrap();
    }

    #[test]
    fn test_load_resolves_rust_sources() {
        let dir = tempfile::tempdir().unwrap();
        write_db(
            dir.path(),
            r#"[
                {"file": "src/main.rs", "directory": "/proj", "arguments": ["rustc", "--edition", "2021"]},
                {"file": "/abs/lib.rs", "command": "rustc --edition 2021 /abs/lib.rs"}
            ]"#,
        );

        let units = load(dir.path()).unwrap();
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].path, Path::new("/proj/src/main.rs"));
        assert_eq!(units[0].args, ["rustc", "--edition", "2021"]);
        assert_eq!(units[1].path, Path::new("/abs/lib.rs"));
        assert_eq!(units[1].args[0], "rustc");
    }

    #[test]
    fn test_non_rust_entries_are_filtered() {
        let dir = tempfile::tempdir().unwrap();
        write_db(
            dir.path(),
            r#"[
                {"file": "native/glue.c"},
                {"file": "src/lib.rs"}
            ]"#,
        );

        let units = load(dir.path()).unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].path, Path::new("src/lib.rs"));
    }

    #[test]
    fn test_missing_description_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::BuildDescription(_)));
    }

    #[test]
    fn test_malformed_description_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_db(dir.path(), "{ not json");
        assert!(matches!(
            load(dir.path()).unwrap_err(),
            Error::BuildDescription(_)
        ));
    }

    #[test]
    fn test_empty_resolution_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_db(dir.path(), r#"[{"file": "native/glue.c"}]"#);
        assert!(matches!(
            load(dir.path()).unwrap_err(),
            Error::NoInputFiles(_)
        ));
    }
}
