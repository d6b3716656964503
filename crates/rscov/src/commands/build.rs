//! Whole-build mode: expand a build description and instrument every unit.

use crate::compiledb;
use crate::error::Result;
use crate::output::Placement;
use crate::probe::ProbeStyle;
use std::path::Path;

/// Instrument every Rust source the build description names, collecting the
/// rewritten files under `out_dir`.
///
/// Fatal only when the description cannot be resolved or resolves to zero
/// files; individual unit failures are reported and skipped.
pub fn run(
    build_dir: &Path,
    frontend_args: &[String],
    style: ProbeStyle,
    out_dir: &Path,
    manifest: Option<&Path>,
) -> Result<()> {
    let mut units = compiledb::load(build_dir)?;
    for unit in &mut units {
        unit.args.extend_from_slice(frontend_args);
    }
    eprintln!(
        "{} unit(s) from {}",
        units.len(),
        build_dir.join(compiledb::BUILD_DB_NAME).display()
    );
    if !frontend_args.is_empty() {
        eprintln!("frontend args: {}", frontend_args.join(" "));
    }

    let placement = Placement::Root {
        dir: out_dir.to_path_buf(),
    };
    super::instrument::run_units(&units, style, &placement, manifest)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_unresolvable_description_is_fatal_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");

        let err = run(dir.path(), &[], ProbeStyle::Coverage, &out, None).unwrap_err();
        assert!(matches!(err, Error::BuildDescription(_)));
        assert!(!out.exists());
    }

    #[test]
    fn test_empty_resolution_is_fatal_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(compiledb::BUILD_DB_NAME),
            r#"[{"file": "glue.c"}]"#,
        )
        .unwrap();
        let out = dir.path().join("out");

        let err = run(dir.path(), &[], ProbeStyle::Coverage, &out, None).unwrap_err();
        assert!(matches!(err, Error::NoInputFiles(_)));
        assert!(!out.exists());
    }

    #[test]
    fn test_build_collects_outputs_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("lib.rs");
        std::fs::write(&src, "fn a() {}\n").unwrap();
        std::fs::write(
            dir.path().join(compiledb::BUILD_DB_NAME),
            format!(r#"[{{"file": {:?}, "arguments": ["rustc"]}}]"#, src),
        )
        .unwrap();
        let out = dir.path().join("out");

        run(dir.path(), &[], ProbeStyle::Coverage, &out, None).unwrap();

        let rewritten = std::fs::read_to_string(out.join("lib.rs")).unwrap();
        assert!(rewritten.contains("rscov_runtime::hit(\"a:1\");"));
        // Original untouched.
        assert_eq!(std::fs::read_to_string(&src).unwrap(), "fn a() {}\n");
    }
}
