use crate::utils::{CsvError, IoConfig, Result, LINE_ENDING};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tracing::{debug, warn};

type BoxedWrite = Box<dyn AsyncWrite + Send + Unpin>;

pub struct LineSink {
    writer: Option<BufWriter<BoxedWrite>>,
    path: Option<PathBuf>,
    buffer_capacity: usize,
    flush_every_line: bool,
    unflushed: bool,
}

impl LineSink {
    pub fn new() -> Self {
        Self::with_config(&IoConfig::default())
    }

    pub fn with_config(config: &IoConfig) -> Self {
        Self {
            writer: None,
            path: None,
            buffer_capacity: config.write_buffer_capacity,
            flush_every_line: config.flush_every_line,
            unflushed: false,
        }
    }

    pub fn from_writer<W>(writer: W) -> Self
    where
        W: AsyncWrite + Send + Unpin + 'static,
    {
        let mut sink = Self::new();
        sink.attach(Box::new(writer));
        sink
    }

    /// Creates the file, truncating any existing content. Output pending on a
    /// previously opened stream is flushed before the new file is created.
    pub async fn open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.flush().await?;
        let file = tokio::fs::File::create(path)
            .await
            .map_err(|e| CsvError::file_open(path, e))?;

        self.close().await?;
        self.attach(Box::new(file));
        self.path = Some(path.to_path_buf());
        debug!(path = %path.display(), "Opened line sink");
        Ok(())
    }

    fn attach(&mut self, writer: BoxedWrite) {
        self.writer = Some(BufWriter::with_capacity(self.buffer_capacity, writer));
        self.unflushed = false;
    }

    /// Appends `line` and the platform line terminator. Returns once the sink has
    /// accepted the bytes (and flushed them, if configured to).
    pub async fn write_line(&mut self, line: &str) -> Result<()> {
        let writer = self.writer.as_mut().ok_or(CsvError::WriterNotInitialized)?;

        writer.write_all(line.as_bytes()).await?;
        writer.write_all(LINE_ENDING.as_bytes()).await?;

        if self.flush_every_line {
            writer.flush().await?;
        } else {
            self.unflushed = true;
        }
        Ok(())
    }

    pub async fn flush(&mut self) -> Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush().await?;
            self.unflushed = false;
        }
        Ok(())
    }

    /// Flushes and releases the stream. A no-op when nothing is open.
    pub async fn close(&mut self) -> Result<()> {
        let Some(mut writer) = self.writer.take() else {
            return Ok(());
        };
        self.unflushed = false;
        let path = self.path.take();

        writer.flush().await?;
        writer.shutdown().await?;
        debug!(path = ?path, "Closed line sink");
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }
}

impl Default for LineSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LineSink {
    fn drop(&mut self) {
        if self.writer.is_some() && self.unflushed {
            warn!(path = ?self.path, "Line sink dropped with unflushed output; call close() first");
        }
    }
}
