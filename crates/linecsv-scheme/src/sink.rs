use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::SchemeResult;

/// Receiver of encoded output lines. Lines arrive without a terminator.
pub trait LineSink {
    fn write_line(&mut self, line: &[u8]) -> SchemeResult<()>;

    fn flush(&mut self) -> SchemeResult<()> {
        Ok(())
    }
}

/// Collects lines in memory.
impl LineSink for Vec<Vec<u8>> {
    fn write_line(&mut self, line: &[u8]) -> SchemeResult<()> {
        self.push(line.to_vec());
        Ok(())
    }
}

/// Writes each line followed by `\n`.
#[derive(Debug)]
pub struct WriterLineSink<W: Write> {
    inner: W,
}

impl<W: Write> WriterLineSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl WriterLineSink<BufWriter<File>> {
    /// Create (or truncate) a file.
    pub fn create<P: AsRef<Path>>(path: P) -> SchemeResult<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> LineSink for WriterLineSink<W> {
    fn write_line(&mut self, line: &[u8]) -> SchemeResult<()> {
        self.inner.write_all(line)?;
        self.inner.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> SchemeResult<()> {
        self.inner.flush()?;
        Ok(())
    }
}
