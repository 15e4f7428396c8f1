use crate::utils::{CsvError, IoConfig, Result};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};
use tracing::debug;

type BoxedRead = Box<dyn AsyncRead + Send + Unpin>;

/// Line-at-a-time reader over a file or any async byte stream.
///
/// The underlying handle is owned exclusively and released on `close` or drop,
/// whichever comes first.
pub struct LineSource {
    lines: Option<Lines<BufReader<BoxedRead>>>,
    path: Option<PathBuf>,
    buffer_capacity: usize,
}

impl LineSource {
    pub fn new() -> Self {
        Self::with_config(&IoConfig::default())
    }

    pub fn with_config(config: &IoConfig) -> Self {
        Self {
            lines: None,
            path: None,
            buffer_capacity: config.read_buffer_capacity,
        }
    }

    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        let mut source = Self::new();
        source.attach(Box::new(reader));
        source
    }

    pub async fn open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|e| CsvError::file_open(path, e))?;

        self.close();
        self.attach(Box::new(file));
        self.path = Some(path.to_path_buf());
        debug!(path = %path.display(), "Opened line source");
        Ok(())
    }

    fn attach(&mut self, reader: BoxedRead) {
        self.lines = Some(BufReader::with_capacity(self.buffer_capacity, reader).lines());
    }

    /// Returns the next line without its terminator, or `None` once the input is exhausted.
    pub async fn read_line(&mut self) -> Result<Option<String>> {
        let lines = self.lines.as_mut().ok_or(CsvError::ReaderNotInitialized)?;
        Ok(lines.next_line().await?)
    }

    pub fn close(&mut self) {
        if self.lines.take().is_some() {
            debug!(path = ?self.path, "Closed line source");
        }
        self.path = None;
    }

    pub fn is_open(&self) -> bool {
        self.lines.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl Default for LineSource {
    fn default() -> Self {
        Self::new()
    }
}
