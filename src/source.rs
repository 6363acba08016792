use std::fs::File;
use std::path::Path;

use memmap2::{Mmap, MmapOptions};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Character-addressable read access to an opened document.
///
/// Offsets count characters, not bytes, so they stay meaningful for
/// multi-byte UTF-8 content. Implementations hold the whole document
/// resident (decoded or mapped), which keeps every read infallible; the
/// only fallible step is opening, which surfaces `SourceUnavailable`.
pub trait TextSource {
    /// Character at `offset`, or `None` past the end.
    fn read_char_at(&self, offset: usize) -> Option<char>;

    /// Total length in characters.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn at_end(&self, offset: usize) -> bool {
        offset >= self.len()
    }

    /// Materialize the character range `start..end` as an owned string.
    fn slice(&self, start: usize, end: usize) -> String {
        (start..end.min(self.len()))
            .filter_map(|i| self.read_char_at(i))
            .collect()
    }
}

/// Document fully decoded into a fixed-width character buffer.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    chars: Vec<char>,
}

impl InMemorySource {
    pub fn new(text: impl AsRef<str>) -> Self {
        Self {
            chars: text.as_ref().chars().collect(),
        }
    }

    /// Read and decode a text file with async buffered I/O.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening text source: {}", path.display());

        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::SourceUnavailable {
                path: path.to_path_buf(),
                source: e,
            })?;

        let source = Self::new(&text);
        info!(
            "Opened {}: {} chars ({} bytes)",
            path.display(),
            source.len(),
            text.len()
        );
        Ok(source)
    }
}

impl TextSource for InMemorySource {
    fn read_char_at(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    fn len(&self) -> usize {
        self.chars.len()
    }
}

/// Memory-mapped document with a character-to-byte table.
///
/// The table keeps seeking character-granular over variable-width UTF-8;
/// byte offsets never leak to callers.
#[derive(Debug)]
pub struct MappedSource {
    // None only for zero-length files, which cannot be mapped.
    map: Option<Mmap>,
    char_starts: Vec<usize>,
}

impl MappedSource {
    /// Map a text file and validate it as UTF-8.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Mapping text source: {}", path.display());

        let unavailable = |e: std::io::Error| Error::SourceUnavailable {
            path: path.to_path_buf(),
            source: e,
        };

        let file = File::open(path).map_err(unavailable)?;
        let len = file.metadata().map_err(unavailable)?.len();
        if len == 0 {
            return Ok(Self {
                map: None,
                char_starts: Vec::new(),
            });
        }

        let map = unsafe { MmapOptions::new().map(&file) }.map_err(unavailable)?;

        let content = std::str::from_utf8(&map).map_err(|e| Error::SourceUnavailable {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;

        let char_starts: Vec<usize> = content.char_indices().map(|(b, _)| b).collect();
        info!(
            "Mapped {}: {} chars ({} bytes)",
            path.display(),
            char_starts.len(),
            map.len()
        );

        Ok(Self {
            map: Some(map),
            char_starts,
        })
    }

    fn byte_range(&self, start: usize, end: usize) -> &str {
        let Some(map) = self.map.as_ref() else {
            return "";
        };
        let byte_start = self.char_starts[start];
        let byte_end = self.char_starts.get(end).copied().unwrap_or(map.len());
        // Boundaries come from char_indices over validated UTF-8.
        unsafe { std::str::from_utf8_unchecked(&map[byte_start..byte_end]) }
    }
}

impl TextSource for MappedSource {
    fn read_char_at(&self, offset: usize) -> Option<char> {
        if offset >= self.char_starts.len() {
            return None;
        }
        self.byte_range(offset, offset + 1).chars().next()
    }

    fn len(&self) -> usize {
        self.char_starts.len()
    }

    fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.len());
        if start >= end {
            return String::new();
        }
        self.byte_range(start, end).to_string()
    }
}
