use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot load build description: {0}")]
    BuildDescription(String),

    #[error("No input files: {0}")]
    NoInputFiles(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Source location {line}:{column} outside buffer")]
    Location { line: usize, column: usize },

    #[error("Insertion offset {offset} invalid for {len}-byte buffer")]
    Offset { offset: usize, len: usize },

    #[error("Cannot write output {path}: {source}")]
    OutputPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const INVALID_ARGUMENTS: i32 = 2;
    pub const BUILD_DESCRIPTION: i32 = 3;
    pub const NO_INPUT_FILES: i32 = 4;
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::BuildDescription(_) => exit_code::BUILD_DESCRIPTION,
            Error::NoInputFiles(_) => exit_code::NO_INPUT_FILES,
            Error::InvalidArgument(_) => exit_code::INVALID_ARGUMENTS,
            _ => exit_code::GENERAL_ERROR,
        }
    }
}
