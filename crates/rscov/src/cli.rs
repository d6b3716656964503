use crate::output::DEFAULT_SUFFIX;
use crate::probe::ProbeStyle;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rscov")]
#[command(about = "Function-entry coverage instrumenter for Rust sources")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Source files to instrument (single-file mode)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Probe flavor to inject
    #[arg(long, value_enum, default_value = "coverage")]
    pub probe: ProbeStyle,

    /// Collect rewritten files under this directory instead of suffixing
    #[arg(long, short = 'o')]
    pub out_dir: Option<PathBuf>,

    /// Marker spliced before the extension in suffix mode
    #[arg(long, default_value = DEFAULT_SUFFIX, conflicts_with = "out_dir")]
    pub suffix: String,

    /// Write all generated probe ids to this file
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Extra arguments passed through to the frontend
    #[arg(last = true)]
    pub frontend_args: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Instrument every Rust source of a build description
    Build {
        /// Directory containing compile_commands.json
        #[arg(long, short = 'b')]
        build_dir: PathBuf,

        /// Output root for the rewritten files
        #[arg(long, short = 'o', default_value = "instrumented")]
        out_dir: PathBuf,

        /// Probe flavor to inject
        #[arg(long, value_enum, default_value = "coverage")]
        probe: ProbeStyle,

        /// Write all generated probe ids to this file
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Extra arguments passed through to the frontend
        #[arg(last = true)]
        frontend_args: Vec<String>,
    },

    /// Summarize a coverage report written by an instrumented run
    Report {
        /// Coverage report file
        report: PathBuf,

        /// Probe manifest written at instrumentation time
        #[arg(long)]
        manifest: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

impl Cli {
    pub fn validate(&self) -> Result<(), String> {
        if self.command.is_none() {
            if self.files.is_empty() {
                return Err("At least one source file is required".to_string());
            }
            if self.out_dir.is_none() && self.suffix.is_empty() {
                return Err("--suffix must not be empty".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_file_mode_parses() {
        let cli = Cli::try_parse_from(["rscov", "src/lib.rs", "src/main.rs"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.files.len(), 2);
        assert_eq!(cli.suffix, DEFAULT_SUFFIX);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_frontend_args_after_separator() {
        let cli =
            Cli::try_parse_from(["rscov", "a.rs", "--", "--edition", "2021"]).unwrap();
        assert_eq!(cli.frontend_args, ["--edition", "2021"]);
    }

    #[test]
    fn test_build_mode_requires_build_dir() {
        assert!(Cli::try_parse_from(["rscov", "build"]).is_err());
        let cli = Cli::try_parse_from(["rscov", "build", "--build-dir", "target"]).unwrap();
        match cli.command {
            Some(Command::Build {
                build_dir, out_dir, ..
            }) => {
                assert_eq!(build_dir, PathBuf::from("target"));
                assert_eq!(out_dir, PathBuf::from("instrumented"));
            }
            other => panic!("expected build command, got {:?}", other),
        }
    }

    #[test]
    fn test_build_mode_frontend_args() {
        let cli = Cli::try_parse_from([
            "rscov", "build", "-b", "target", "--", "--cfg", "demo",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Build { frontend_args, .. }) => {
                assert_eq!(frontend_args, ["--cfg", "demo"]);
            }
            other => panic!("expected build command, got {:?}", other),
        }
    }

    #[test]
    fn test_no_files_fails_validation() {
        let cli = Cli::try_parse_from(["rscov"]).unwrap();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_out_dir_conflicts_with_suffix() {
        assert!(Cli::try_parse_from([
            "rscov", "a.rs", "--out-dir", "out", "--suffix", "_x"
        ])
        .is_err());
    }

    #[test]
    fn test_probe_style_flag() {
        let cli = Cli::try_parse_from(["rscov", "a.rs", "--probe", "trace"]).unwrap();
        assert_eq!(cli.probe, ProbeStyle::Trace);
    }
}
