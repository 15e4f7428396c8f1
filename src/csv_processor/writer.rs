use crate::csv_processor::line_sink::LineSink;
use crate::csv_processor::record::Contact;
use crate::utils::{CsvError, IoConfig, Result, DELIMITER};
use std::path::Path;
use tokio::io::AsyncWrite;

/// Write side of [`crate::CsvReaderWriter`].
#[allow(async_fn_in_trait)]
pub trait ContactWriter {
    async fn open(&mut self, path: &Path) -> Result<()>;

    async fn write<S: AsRef<str>>(&mut self, columns: &[S]) -> Result<()>;

    async fn close(&mut self) -> Result<()>;
}

/// Joins columns with a single tab, no leading or trailing delimiter.
pub fn join_columns<S: AsRef<str>>(columns: &[S]) -> Result<String> {
    if columns.is_empty() {
        return Err(CsvError::EmptyRecord);
    }

    let capacity = columns.iter().map(|c| c.as_ref().len() + 1).sum();
    let mut line = String::with_capacity(capacity);
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            line.push(DELIMITER);
        }
        line.push_str(column.as_ref());
    }
    Ok(line)
}

pub struct CsvWriter {
    sink: LineSink,
    lines_written: usize,
}

impl CsvWriter {
    pub fn new() -> Self {
        Self::from_sink(LineSink::new())
    }

    pub fn with_config(config: &IoConfig) -> Self {
        Self::from_sink(LineSink::with_config(config))
    }

    pub fn from_sink(sink: LineSink) -> Self {
        Self {
            sink,
            lines_written: 0,
        }
    }

    pub fn from_writer<W>(writer: W) -> Self
    where
        W: AsyncWrite + Send + Unpin + 'static,
    {
        Self::from_sink(LineSink::from_writer(writer))
    }

    pub async fn create_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut writer = Self::new();
        writer.open(path.as_ref()).await?;
        Ok(writer)
    }

    pub async fn open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.sink.open(path).await?;
        self.lines_written = 0;
        Ok(())
    }

    pub async fn write<S: AsRef<str>>(&mut self, columns: &[S]) -> Result<()> {
        let line = join_columns(columns)?;
        self.write_line(&line).await
    }

    pub async fn write_contact(&mut self, contact: &Contact) -> Result<()> {
        self.write(&[contact.name(), contact.address()]).await
    }

    pub async fn write_line(&mut self, line: &str) -> Result<()> {
        self.sink.write_line(line).await?;
        self.lines_written += 1;
        Ok(())
    }

    pub async fn flush(&mut self) -> Result<()> {
        self.sink.flush().await
    }

    pub async fn close(&mut self) -> Result<()> {
        self.sink.close().await
    }

    pub fn is_open(&self) -> bool {
        self.sink.is_open()
    }

    pub fn lines_written(&self) -> usize {
        self.lines_written
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactWriter for CsvWriter {
    async fn open(&mut self, path: &Path) -> Result<()> {
        CsvWriter::open(self, path).await
    }

    async fn write<S: AsRef<str>>(&mut self, columns: &[S]) -> Result<()> {
        CsvWriter::write(self, columns).await
    }

    async fn close(&mut self) -> Result<()> {
        CsvWriter::close(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::LINE_ENDING;

    #[test]
    fn join_places_tabs_only_between_columns() {
        assert_eq!(join_columns(&["Column 1"]).unwrap(), "Column 1");
        assert_eq!(
            join_columns(&["Column 1", "Column 2", "Column 3"]).unwrap(),
            "Column 1\tColumn 2\tColumn 3"
        );
        assert_eq!(join_columns(&["", ""]).unwrap(), "\t");
    }

    #[test]
    fn join_rejects_empty_column_list() {
        let none: [&str; 0] = [];
        assert!(matches!(join_columns(&none), Err(CsvError::EmptyRecord)));
    }

    #[test]
    fn join_tab_count_matches_column_count() {
        for n in 1..=6 {
            let columns: Vec<String> = (0..n).map(|i| format!("c{i}")).collect();
            let line = join_columns(&columns).unwrap();
            assert_eq!(line.matches(DELIMITER).count(), n - 1);
            assert!(!line.starts_with(DELIMITER));
            assert!(!line.ends_with(DELIMITER));
        }
    }

    #[tokio::test]
    async fn writes_variable_column_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("columns.tsv");

        let rows: Vec<Vec<&str>> = vec![
            vec!["Column 1"],
            vec!["Column 1", "Column 2"],
            vec!["Column 1", "Column 2", "Column 3"],
        ];

        let mut writer = CsvWriter::create_path(&path).await.unwrap();
        for row in &rows {
            writer.write(row).await.unwrap();
        }
        assert_eq!(writer.lines_written(), 3);
        writer.close().await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.split(LINE_ENDING).filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), rows.len());
        for (line, row) in lines.iter().zip(&rows) {
            let columns: Vec<&str> = line.split(DELIMITER).collect();
            assert_eq!(&columns, row);
        }
    }

    #[tokio::test]
    async fn write_before_open_fails() {
        let mut writer = CsvWriter::new();
        for _ in 0..2 {
            assert!(matches!(
                writer.write(&["a", "b"]).await,
                Err(CsvError::WriterNotInitialized)
            ));
            assert!(matches!(
                writer.write_line("This Is a Test").await,
                Err(CsvError::WriterNotInitialized)
            ));
        }
        assert_eq!(writer.lines_written(), 0);
    }

    #[tokio::test]
    async fn close_without_open_is_a_no_op() {
        let mut writer = CsvWriter::new();
        writer.close().await.unwrap();
        writer.close().await.unwrap();
        assert!(!writer.is_open());
    }
}
