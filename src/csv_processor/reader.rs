use crate::csv_processor::line_source::LineSource;
use crate::csv_processor::record::Contact;
use crate::utils::{IoConfig, Result};
use std::path::Path;
use tokio::io::AsyncRead;
use tracing::debug;

/// Read side of [`crate::CsvReaderWriter`].
#[allow(async_fn_in_trait)]
pub trait ContactReader {
    async fn open(&mut self, path: &Path) -> Result<()>;

    /// Next well-formed contact, or `None` at end of input.
    async fn read_contact(&mut self) -> Result<Option<Contact>>;

    fn close(&mut self);
}

pub struct CsvReader {
    source: LineSource,
    lines_read: usize,
    lines_skipped: usize,
}

impl CsvReader {
    pub fn new() -> Self {
        Self::from_source(LineSource::new())
    }

    pub fn with_config(config: &IoConfig) -> Self {
        Self::from_source(LineSource::with_config(config))
    }

    pub fn from_source(source: LineSource) -> Self {
        Self {
            source,
            lines_read: 0,
            lines_skipped: 0,
        }
    }

    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        Self::from_source(LineSource::from_reader(reader))
    }

    pub async fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut reader = Self::new();
        reader.open(path.as_ref()).await?;
        Ok(reader)
    }

    pub async fn open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.source.open(path).await?;
        self.lines_read = 0;
        self.lines_skipped = 0;
        Ok(())
    }

    pub async fn read_line(&mut self) -> Result<Option<String>> {
        let line = self.source.read_line().await?;
        if line.is_some() {
            self.lines_read += 1;
        }
        Ok(line)
    }

    /// Reads until a line maps to a contact. Malformed lines are skipped, so
    /// `None` always means the input is exhausted.
    pub async fn read_contact(&mut self) -> Result<Option<Contact>> {
        while let Some(line) = self.read_line().await? {
            match Contact::parse(&line) {
                Some(contact) => return Ok(Some(contact)),
                None => {
                    self.lines_skipped += 1;
                    debug!(
                        line_number = self.lines_read,
                        path = ?self.source.path(),
                        "Skipping malformed line"
                    );
                }
            }
        }
        Ok(None)
    }

    pub async fn read_all(&mut self) -> Result<Vec<Contact>> {
        let mut contacts = Vec::new();
        while let Some(contact) = self.read_contact().await? {
            contacts.push(contact);
        }
        Ok(contacts)
    }

    pub fn close(&mut self) {
        self.source.close();
    }

    pub fn is_open(&self) -> bool {
        self.source.is_open()
    }

    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    pub fn lines_skipped(&self) -> usize {
        self.lines_skipped
    }
}

impl Default for CsvReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactReader for CsvReader {
    async fn open(&mut self, path: &Path) -> Result<()> {
        CsvReader::open(self, path).await
    }

    async fn read_contact(&mut self) -> Result<Option<Contact>> {
        CsvReader::read_contact(self).await
    }

    fn close(&mut self) {
        CsvReader::close(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::CsvError;
    use std::io::Cursor;

    fn reader_over(text: &str) -> CsvReader {
        CsvReader::from_reader(Cursor::new(text.as_bytes().to_vec()))
    }

    #[tokio::test]
    async fn malformed_lines_are_skipped_not_terminal() {
        let mut reader = reader_over("Name1\tAddress1\nName2\nName3\tAddress3\n");

        let contacts = reader.read_all().await.unwrap();
        assert_eq!(
            contacts,
            vec![
                Contact::new("Name1", "Address1"),
                Contact::new("Name3", "Address3"),
            ]
        );
        assert_eq!(reader.lines_read(), 3);
        assert_eq!(reader.lines_skipped(), 1);
    }

    #[tokio::test]
    async fn reading_past_end_keeps_returning_none() {
        let mut reader = reader_over("Alice\t221B Baker St\n");

        assert!(reader.read_contact().await.unwrap().is_some());
        for _ in 0..3 {
            assert_eq!(reader.read_contact().await.unwrap(), None);
        }
    }

    #[tokio::test]
    async fn trailing_malformed_lines_end_in_none() {
        let mut reader = reader_over("Alice\tHere\n\nBob\n");
        assert!(reader.read_contact().await.unwrap().is_some());
        assert_eq!(reader.read_contact().await.unwrap(), None);
        assert_eq!(reader.lines_skipped(), 2);
    }

    #[tokio::test]
    async fn raw_line_read_is_untouched() {
        let mut reader = reader_over("a\tb\tc\n");
        assert_eq!(reader.read_line().await.unwrap().as_deref(), Some("a\tb\tc"));
        assert_eq!(reader.read_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn read_before_open_fails() {
        let mut reader = CsvReader::new();
        for _ in 0..2 {
            assert!(matches!(
                reader.read_contact().await,
                Err(CsvError::ReaderNotInitialized)
            ));
            assert!(matches!(
                reader.read_line().await,
                Err(CsvError::ReaderNotInitialized)
            ));
        }
    }

    #[tokio::test]
    async fn open_errors_surface_unchanged() {
        let err = CsvReader::open_path("/no/such/contacts.tsv")
            .await
            .err()
            .unwrap();
        assert!(matches!(err, CsvError::FileOpen { .. }));
    }
}
