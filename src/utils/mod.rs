pub mod config;
pub mod errors;

pub use config::{AppConfig, IoConfig, LoggingConfig};
pub use errors::{CsvError, Result};

pub const DELIMITER: char = '\t';

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";
