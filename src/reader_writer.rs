use crate::csv_processor::{Contact, ContactReader, ContactWriter, CsvReader, CsvWriter};
use crate::utils::{CsvError, IoConfig, Result};
use std::fmt;
use std::ops::BitOr;
use std::path::Path;
use tracing::warn;

/// Access mode flags accepted by [`CsvReaderWriter::open`]. Only `READ` and
/// `WRITE` on their own are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mode(u8);

impl Mode {
    pub const READ: Mode = Mode(1);
    pub const WRITE: Mode = Mode(2);

    pub const fn from_bits(bits: u8) -> Self {
        Mode(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for Mode {
    type Output = Mode;

    fn bitor(self, rhs: Mode) -> Mode {
        Mode(self.0 | rhs.0)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Mode::READ => write!(f, "read"),
            Mode::WRITE => write!(f, "write"),
            Mode(bits) => write!(f, "{bits}"),
        }
    }
}

/// Combined reader/writer keeping the legacy two-column API.
///
/// New code should prefer [`CsvReader`] and [`CsvWriter`] directly; this type
/// exists for callers that only check the boolean returned by [`read`](Self::read).
pub struct CsvReaderWriter<R = CsvReader, W = CsvWriter> {
    reader: R,
    writer: W,
}

impl CsvReaderWriter {
    pub fn new() -> Self {
        Self::with_parts(CsvReader::new(), CsvWriter::new())
    }

    pub fn with_config(config: &IoConfig) -> Self {
        Self::with_parts(CsvReader::with_config(config), CsvWriter::with_config(config))
    }
}

impl Default for CsvReaderWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ContactReader, W: ContactWriter> CsvReaderWriter<R, W> {
    pub fn with_parts(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub async fn open(&mut self, path: impl AsRef<Path>, mode: Mode) -> Result<()> {
        let path = path.as_ref();
        match mode {
            Mode::READ => self.reader.open(path).await,
            Mode::WRITE => self.writer.open(path).await,
            other => Err(CsvError::UnsupportedMode {
                path: path.to_path_buf(),
                mode: other,
            }),
        }
    }

    pub async fn write<S: AsRef<str>>(&mut self, columns: &[S]) -> Result<()> {
        self.writer.write(columns).await
    }

    pub async fn read_contact(&mut self) -> Result<Option<Contact>> {
        self.reader.read_contact().await
    }

    /// Legacy read: `(name, address, true)` for the next record, otherwise
    /// `(None, None, false)`. Reader errors are logged and reported as "no record".
    pub async fn read(&mut self) -> (Option<String>, Option<String>, bool) {
        match self.read_contact().await {
            Ok(Some(contact)) => {
                let (name, address) = contact.into_columns();
                (Some(name), Some(address), true)
            }
            Ok(None) => (None, None, false),
            Err(e) => {
                warn!(error = %e, "Read failed, reporting no record");
                (None, None, false)
            }
        }
    }

    /// Closes both sides. Safe to call on parts that were never opened, and
    /// safe to call repeatedly.
    pub async fn close(&mut self) -> Result<()> {
        self.reader.close();
        self.writer.close().await
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}
