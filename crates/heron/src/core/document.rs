//! The unit of work handed to classifiers: a filename plus a seekable byte stream.

use crate::Result;
use std::fmt;
use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::Path;

/// A readable, seekable byte source owned by one classification call.
pub trait DocumentStream: Read + Seek + Send {}

impl<T: Read + Seek + Send> DocumentStream for T {}

/// An uploaded or on-disk document.
///
/// The stream position is always 0 when control returns from a selector or
/// extractor, so any number of strategies can read the same document in sequence.
pub struct Document {
    filename: String,
    stream: Box<dyn DocumentStream>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document").field("filename", &self.filename).finish_non_exhaustive()
    }
}

impl Document {
    pub fn new(filename: impl Into<String>, stream: impl DocumentStream + 'static) -> Self {
        Self {
            filename: filename.into(),
            stream: Box::new(stream),
        }
    }

    /// Wrap an in-memory buffer.
    pub fn from_bytes(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self::new(filename, Cursor::new(content.into()))
    }

    /// Open a file from disk; the document's filename is the path's final component.
    ///
    /// # Errors
    ///
    /// Returns `HeronError::Io` if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(filename, file))
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Lower-cased filename, as matched by the filename-based strategies.
    pub fn normalized_filename(&self) -> String {
        self.filename.to_lowercase()
    }

    /// Read up to `limit` bytes from the start of the stream, then rewind.
    pub fn peek(&mut self, limit: usize) -> Result<Vec<u8>> {
        self.rewind()?;
        let mut buffer = Vec::with_capacity(limit);
        let read_result = (&mut self.stream).take(limit as u64).read_to_end(&mut buffer);
        self.rewind()?;
        read_result?;
        Ok(buffer)
    }

    /// Read the whole stream, then rewind.
    pub fn read_all(&mut self) -> Result<Vec<u8>> {
        self.rewind()?;
        let mut buffer = Vec::new();
        let read_result = self.stream.read_to_end(&mut buffer);
        self.rewind()?;
        read_result?;
        Ok(buffer)
    }

    pub fn rewind(&mut self) -> Result<()> {
        self.stream.seek(SeekFrom::Start(0))?;
        Ok(())
    }

    /// Current stream position.
    pub fn position(&mut self) -> Result<u64> {
        Ok(self.stream.stream_position()?)
    }
}
