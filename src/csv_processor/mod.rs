pub mod line_sink;
pub mod line_source;
pub mod reader;
pub mod record;
pub mod writer;

pub use line_sink::LineSink;
pub use line_source::LineSource;
pub use reader::{ContactReader, CsvReader};
pub use record::Contact;
pub use writer::{join_columns, ContactWriter, CsvWriter};
