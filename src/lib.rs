pub mod csv_processor;
pub mod reader_writer;
pub mod utils;

pub use csv_processor::{
    Contact, ContactReader, ContactWriter, CsvReader, CsvWriter, LineSink, LineSource,
};
pub use reader_writer::{CsvReaderWriter, Mode};
pub use utils::{AppConfig, CsvError, IoConfig, LoggingConfig, Result};
