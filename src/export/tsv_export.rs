//! Tab-separated row sinks.

use std::cell::RefCell;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Destination for rows of numbers
pub trait RowSink {
    /// Append one row
    fn write_row(&mut self, fields: &[f64]) -> io::Result<()>;

    /// Push buffered rows to the underlying destination
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Sink writing tab-separated rows to a file, without a header
pub struct TsvSink {
    writer: csv::Writer<File>,
    path: PathBuf,
}

impl TsvSink {
    /// Create (or truncate) the file at `path`
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        let writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_writer(file);

        log::debug!("Opened sink {}", path.display());
        Ok(Self { writer, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RowSink for TsvSink {
    fn write_row(&mut self, fields: &[f64]) -> io::Result<()> {
        self.writer
            .write_record(fields.iter().map(|v| v.to_string()))
            .map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// In-memory sink; clones share the same rows
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    rows: Rc<RefCell<Vec<Vec<f64>>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every row written so far
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.rows.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.borrow().is_empty()
    }
}

impl RowSink for MemorySink {
    fn write_row(&mut self, fields: &[f64]) -> io::Result<()> {
        self.rows.borrow_mut().push(fields.to_vec());
        Ok(())
    }
}
