//! Input sources and line iteration.
//!
//! A search run reads either standard input or an ordered list of files.
//! Lines are produced lazily as raw bytes so that content which is not valid
//! UTF-8 passes through untouched instead of being rejected or re-encoded.

use std::borrow::Cow;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::errors::{SearchError, SearchResult};

/// A single input line, split on `\n` with the terminator removed.
/// Numbering is 1-based and resets per source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub bytes: Vec<u8>,
    pub number: u64,
}

impl Line {
    pub fn new(bytes: impl Into<Vec<u8>>, number: u64) -> Self {
        Self {
            bytes: bytes.into(),
            number,
        }
    }

    /// The line content as text, with invalid UTF-8 replaced. Only used for
    /// logging; the output path writes the raw bytes.
    pub fn text_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

/// Identifies where lines come from: a named file or standard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Opens the source for reading. File open failures carry the path.
    pub fn open(&self) -> SearchResult<Box<dyn BufRead>> {
        match self {
            Self::Stdin => Ok(Box::new(io::stdin().lock())),
            Self::File(path) => {
                let file = File::open(path)
                    .map_err(|e| SearchError::source_error(path.as_path(), e))?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Stdin => None,
            Self::File(path) => Some(path),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("stdin"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Forward-only iterator of [`Line`] values over a buffered reader.
///
/// Splits on `\n` and strips the terminator (including a preceding `\r`).
/// A final line without a trailing newline is still emitted.
pub struct LineReader<R> {
    reader: R,
    number: u64,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, number: 0 }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                    if buf.last() == Some(&b'\r') {
                        buf.pop();
                    }
                }
                self.number += 1;
                Some(Ok(Line {
                    bytes: buf,
                    number: self.number,
                }))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
