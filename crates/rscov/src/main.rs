use anyhow::Context;
use clap::Parser;
use rscov::cli::{Cli, Command};
use rscov::error::exit_code;
use rscov::output::Placement;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::from(exit_code::SUCCESS as u8),
        Err(e) => {
            eprintln!("Error: {e:#}");
            if let Some(rscov_err) = e.downcast_ref::<rscov::Error>() {
                ExitCode::from(rscov_err.exit_code() as u8)
            } else {
                ExitCode::from(exit_code::GENERAL_ERROR as u8)
            }
        }
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    cli.validate()
        .map_err(rscov::Error::InvalidArgument)
        .context("Invalid arguments")?;

    match cli.command {
        Some(Command::Build {
            build_dir,
            out_dir,
            probe,
            manifest,
            frontend_args,
        }) => {
            rscov::commands::build::run(
                &build_dir,
                &frontend_args,
                probe,
                &out_dir,
                manifest.as_deref(),
            )?;
        }
        Some(Command::Report { report, manifest }) => {
            rscov::commands::report::run(&report, manifest.as_deref())?;
        }
        Some(Command::Completions { shell }) => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "rscov", &mut std::io::stdout());
        }
        None => {
            let placement = match &cli.out_dir {
                Some(dir) => Placement::Root { dir: dir.clone() },
                None => Placement::Suffix {
                    marker: cli.suffix.clone(),
                },
            };
            rscov::commands::instrument::run(
                &cli.files,
                &cli.frontend_args,
                cli.probe,
                &placement,
                cli.manifest.as_deref(),
            )?;
        }
    }

    Ok(())
}
