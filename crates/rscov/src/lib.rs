pub mod cli;
pub mod commands;
pub mod compiledb;
pub mod error;
pub mod instrument;
pub mod output;
pub mod probe;
pub mod rewrite;
pub mod srcmap;
pub mod traverse;

pub use error::{Error, Result};
