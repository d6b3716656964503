pub mod build;
pub mod instrument;
pub mod report;
