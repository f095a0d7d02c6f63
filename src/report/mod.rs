//! Text reports over a loaded library

pub mod config;
pub mod printer;

pub use config::ReportConfig;
pub use printer::Report;
