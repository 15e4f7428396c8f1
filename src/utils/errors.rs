use crate::reader_writer::Mode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("Unable to open file {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("The reader has not been opened. Call open() or construct it with a path")]
    ReaderNotInitialized,

    #[error("The writer has not been opened. Call open() or construct it with a path")]
    WriterNotInitialized,

    #[error("Unknown file mode {mode} for {}", path.display())]
    UnsupportedMode { path: PathBuf, mode: Mode },

    #[error("A record needs at least one column")]
    EmptyRecord,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl CsvError {
    pub(crate) fn file_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CsvError::FileOpen {
            path: path.into(),
            source,
        }
    }

    pub fn is_not_initialized(&self) -> bool {
        matches!(
            self,
            CsvError::ReaderNotInitialized | CsvError::WriterNotInitialized
        )
    }
}

pub type Result<T> = std::result::Result<T, CsvError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn file_open_keeps_underlying_cause() {
        let err = CsvError::file_open(
            "missing.tsv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert!(err.to_string().contains("missing.tsv"));
        let source = err.source().expect("source preserved");
        assert_eq!(source.to_string(), "no such file");
    }

    #[test]
    fn unsupported_mode_names_the_path() {
        let err = CsvError::UnsupportedMode {
            path: PathBuf::from("contacts.tsv"),
            mode: Mode::from_bits(4),
        };
        assert_eq!(err.to_string(), "Unknown file mode 4 for contacts.tsv");
    }

    #[test]
    fn not_initialized_groups_both_sides() {
        assert!(CsvError::ReaderNotInitialized.is_not_initialized());
        assert!(CsvError::WriterNotInitialized.is_not_initialized());
        assert!(!CsvError::EmptyRecord.is_not_initialized());
    }
}
