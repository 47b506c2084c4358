/*!
# Raw line sources

A [`LineSource`] hands out one line of bytes at a time together with its
position, a 0-based line number that restarts with every physical file. A
[`LineTap`] opens sources over stored input: either everything it holds, or just
the first physical file when only the header row is needed.
*/

use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::debug;

use crate::errors::SchemeResult;

/// A sequence of raw lines.
pub trait LineSource: Send {
    /// Replace the contents of `buf` with the next line, without its line
    /// terminator, and return the line's position. `None` at end of input.
    fn read_line(&mut self, buf: &mut Vec<u8>) -> SchemeResult<Option<u64>>;
}

/// Stored input that line sources can be opened on.
pub trait LineTap: Send + Sync {
    /// Human readable name of the input, for messages.
    fn identifier(&self) -> String;

    /// A source over a single physical file, used to peek at the header row.
    fn open_representative(&self) -> SchemeResult<Box<dyn LineSource>>;

    /// A source over all of the input.
    fn open_all(&self) -> SchemeResult<Box<dyn LineSource>>;
}

// ================================================================================================
// Buffered Readers
// ================================================================================================

/// Splits any buffered reader into lines ending in `\n`, `\r` or `\r\n`.
pub struct BufReadLineSource<R> {
    reader: R,
    position: u64,
    // last line ended in `\r`; a `\n` right after it belongs to that line
    skip_lf: bool,
}

impl<R: BufRead> BufReadLineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            position: 0,
            skip_lf: false,
        }
    }

    fn next_position(&mut self) -> u64 {
        let position = self.position;
        self.position += 1;
        position
    }
}

impl<R: BufRead + Send> LineSource for BufReadLineSource<R> {
    fn read_line(&mut self, buf: &mut Vec<u8>) -> SchemeResult<Option<u64>> {
        buf.clear();
        let mut partial = false;

        loop {
            let available = self.reader.fill_buf()?;
            if available.is_empty() {
                break;
            }

            if self.skip_lf {
                self.skip_lf = false;
                if available[0] == b'\n' {
                    self.reader.consume(1);
                    continue;
                }
            }

            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(end) => {
                    self.skip_lf = available[end] == b'\r';
                    buf.extend_from_slice(&available[..end]);
                    self.reader.consume(end + 1);
                    return Ok(Some(self.next_position()));
                }
                None => {
                    let len = available.len();
                    buf.extend_from_slice(available);
                    self.reader.consume(len);
                    partial = true;
                }
            }
        }

        Ok(partial.then(|| self.next_position()))
    }
}

// ================================================================================================
// Files
// ================================================================================================

/// A single file, or a directory of part files read in name order.
///
/// Bookkeeping entries in a directory (names starting with `_` or `.`, and
/// `.crc` checksum files) are not data and are skipped.
#[derive(Debug, Clone)]
pub struct FileTap {
    path: PathBuf,
}

impl FileTap {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The physical files behind this tap, in read order.
    pub fn files(&self) -> io::Result<Vec<PathBuf>> {
        if !self.path.is_dir() {
            return Ok(vec![self.path.clone()]);
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.path)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with('_') || name.starts_with('.') || name.ends_with(".crc") {
                continue;
            }
            files.push(entry.path());
        }
        files.sort();
        Ok(files)
    }

    fn open_file(path: &Path) -> SchemeResult<BufReadLineSource<BufReader<File>>> {
        debug!("Opening {}", path.display());
        Ok(BufReadLineSource::new(BufReader::new(File::open(path)?)))
    }
}

impl LineTap for FileTap {
    fn identifier(&self) -> String {
        self.path.display().to_string()
    }

    fn open_representative(&self) -> SchemeResult<Box<dyn LineSource>> {
        let first = self.files()?.into_iter().next().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no data files in {}", self.path.display()),
            )
        })?;
        Ok(Box::new(Self::open_file(&first)?))
    }

    fn open_all(&self) -> SchemeResult<Box<dyn LineSource>> {
        Ok(Box::new(FileLineSource {
            pending: self.files()?.into(),
            current: None,
        }))
    }
}

/// Reads files one after the other; positions restart at 0 for each file.
pub struct FileLineSource {
    pending: VecDeque<PathBuf>,
    current: Option<BufReadLineSource<BufReader<File>>>,
}

impl LineSource for FileLineSource {
    fn read_line(&mut self, buf: &mut Vec<u8>) -> SchemeResult<Option<u64>> {
        loop {
            if let Some(current) = self.current.as_mut() {
                if let Some(position) = current.read_line(buf)? {
                    return Ok(Some(position));
                }
                self.current = None;
            }

            match self.pending.pop_front() {
                Some(path) => self.current = Some(FileTap::open_file(&path)?),
                None => return Ok(None),
            }
        }
    }
}

// ================================================================================================
// In-Memory
// ================================================================================================

/// Lines held in memory, already split and numbered.
#[derive(Debug, Clone, Default)]
pub struct MemoryLineSource {
    lines: VecDeque<(u64, Vec<u8>)>,
}

impl MemoryLineSource {
    /// One physical file: positions 0, 1, 2, ...
    pub fn new<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        Self::with_positions(
            lines
                .into_iter()
                .enumerate()
                .map(|(i, line)| (i as u64, line.as_ref().to_vec())),
        )
    }

    /// Lines with explicit positions, e.g. a split that starts mid-file.
    pub fn with_positions<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = (u64, Vec<u8>)>,
    {
        Self {
            lines: lines.into_iter().collect(),
        }
    }
}

impl LineSource for MemoryLineSource {
    fn read_line(&mut self, buf: &mut Vec<u8>) -> SchemeResult<Option<u64>> {
        buf.clear();
        Ok(self.lines.pop_front().map(|(position, line)| {
            buf.extend_from_slice(&line);
            position
        }))
    }
}

/// In-memory physical files of lines. Counts how often the representative
/// source was opened.
#[derive(Debug, Default)]
pub struct MemoryTap {
    files: Vec<Vec<Vec<u8>>>,
    representative_opens: AtomicUsize,
}

impl MemoryTap {
    /// A tap holding one file.
    pub fn from_lines<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        Self::from_files([lines])
    }

    pub fn from_files<F, I, L>(files: F) -> Self
    where
        F: IntoIterator<Item = I>,
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        Self {
            files: files
                .into_iter()
                .map(|file| file.into_iter().map(|l| l.as_ref().to_vec()).collect())
                .collect(),
            representative_opens: AtomicUsize::new(0),
        }
    }

    pub fn representative_opens(&self) -> usize {
        self.representative_opens.load(Ordering::SeqCst)
    }

    /// A source over one file only, like a single split of the input.
    pub fn open_file(&self, index: usize) -> MemoryLineSource {
        MemoryLineSource::new(self.files.get(index).cloned().unwrap_or_default())
    }
}

impl LineTap for MemoryTap {
    fn identifier(&self) -> String {
        format!("memory:{}-files", self.files.len())
    }

    fn open_representative(&self) -> SchemeResult<Box<dyn LineSource>> {
        self.representative_opens.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(self.open_file(0)))
    }

    fn open_all(&self) -> SchemeResult<Box<dyn LineSource>> {
        let lines = self.files.iter().flat_map(|file| {
            file.iter()
                .enumerate()
                .map(|(i, line)| (i as u64, line.clone()))
        });
        Ok(Box::new(MemoryLineSource::with_positions(lines)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::TempDir;

    fn drain(mut source: Box<dyn LineSource>) -> Vec<(u64, String)> {
        let mut buf = Vec::new();
        let mut lines = Vec::new();
        while let Some(position) = source.read_line(&mut buf).unwrap() {
            lines.push((position, String::from_utf8(buf.clone()).unwrap()));
        }
        lines
    }

    #[test]
    fn test_buf_read_line_endings() {
        let source = BufReadLineSource::new(Cursor::new(b"a,b\r\nc,d\n\nlast".to_vec()));
        assert_eq!(
            drain(Box::new(source)),
            vec![
                (0, "a,b".to_string()),
                (1, "c,d".to_string()),
                (2, "".to_string()),
                (3, "last".to_string()),
            ]
        );
    }

    #[test]
    fn test_buf_read_lone_cr_endings() {
        let source = BufReadLineSource::new(Cursor::new(b"a,b\rc,d\r\re\r".to_vec()));
        assert_eq!(
            drain(Box::new(source)),
            vec![
                (0, "a,b".to_string()),
                (1, "c,d".to_string()),
                (2, "".to_string()),
                (3, "e".to_string()),
            ]
        );
    }

    #[test]
    fn test_buf_read_crlf_split_across_fills() {
        // a one byte buffer sees `\r` and `\n` in separate fills
        let reader = BufReader::with_capacity(1, Cursor::new(b"x\r\ny\r\n\nz".to_vec()));
        assert_eq!(
            drain(Box::new(BufReadLineSource::new(reader))),
            vec![
                (0, "x".to_string()),
                (1, "y".to_string()),
                (2, "".to_string()),
                (3, "z".to_string()),
            ]
        );
    }

    #[test]
    fn test_file_tap_directory() {
        let dir = TempDir::new().unwrap();
        for (name, contents) in [
            ("part-00001", "h\n3\n"),
            ("part-00000", "h\n1\n2\n"),
            ("_SUCCESS", ""),
            (".part-00000.crc", "junk"),
        ] {
            let mut file = File::create(dir.path().join(name)).unwrap();
            file.write_all(contents.as_bytes()).unwrap();
        }

        let tap = FileTap::new(dir.path());
        assert_eq!(tap.files().unwrap().len(), 2);

        assert_eq!(
            drain(tap.open_all().unwrap()),
            vec![
                (0, "h".to_string()),
                (1, "1".to_string()),
                (2, "2".to_string()),
                (0, "h".to_string()),
                (1, "3".to_string()),
            ]
        );

        assert_eq!(
            drain(tap.open_representative().unwrap()),
            vec![
                (0, "h".to_string()),
                (1, "1".to_string()),
                (2, "2".to_string())
            ]
        );
    }

    #[test]
    fn test_file_tap_empty_directory() {
        let dir = TempDir::new().unwrap();
        let tap = FileTap::new(dir.path());
        assert!(tap.open_representative().is_err());
        assert!(drain(tap.open_all().unwrap()).is_empty());
    }

    #[test]
    fn test_memory_tap() {
        let tap = MemoryTap::from_files([vec!["h", "1"], vec!["h", "2"]]);
        assert_eq!(
            drain(tap.open_all().unwrap()),
            vec![
                (0, "h".to_string()),
                (1, "1".to_string()),
                (0, "h".to_string()),
                (1, "2".to_string()),
            ]
        );
        assert_eq!(tap.representative_opens(), 0);
        drain(tap.open_representative().unwrap());
        assert_eq!(tap.representative_opens(), 1);
    }
}
