use tracing::debug;

use crate::error::{Error, Result};
use crate::segmenter;
use crate::source::TextSource;

/// One discovered paragraph: its start offset and, when materialized at
/// least once, its text. Offsets are permanent; text is a cache that may
/// be dropped and recomputed on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphEntry {
    start_offset: usize,
    text: Option<String>,
}

impl ParagraphEntry {
    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    pub fn cached_text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// Ordered index of paragraph start offsets over one text source.
///
/// Paragraphs are discovered strictly in order: finding paragraph `k`
/// requires the end offset of paragraph `k - 1`, so the index keeps a scan
/// cursor marking how far discovery has progressed. Random access walks
/// discovery forward as needed; already-discovered paragraphs are served
/// from the cache or recomputed from their stored offset.
#[derive(Debug)]
pub struct ParagraphIndex<S> {
    source: S,
    entries: Vec<ParagraphEntry>,
    cursor: usize,
    total_count: Option<usize>,
    sentence_limit: usize,
    changed: bool,
}

impl<S: TextSource> ParagraphIndex<S> {
    /// Fresh index over an unscanned source.
    ///
    /// # Panics
    ///
    /// Panics if `sentence_limit == 0`.
    pub fn new(source: S, sentence_limit: usize) -> Self {
        assert!(sentence_limit > 0, "sentence_limit must be > 0");
        Self {
            source,
            entries: Vec::new(),
            cursor: 0,
            total_count: None,
            sentence_limit,
            changed: false,
        }
    }

    /// Rebuild an index from persisted start offsets (no cached text).
    ///
    /// Persisted state stores only paragraph starts, so the end of the last
    /// known paragraph is recovered here with a single boundary-only scan
    /// from its offset. Discovery then resumes where the saved session left
    /// off instead of re-reading the whole document.
    pub fn restore(
        source: S,
        offsets: &[usize],
        sentence_limit: usize,
        total_count: Option<usize>,
    ) -> Result<Self> {
        assert!(sentence_limit > 0, "sentence_limit must be > 0");

        if let Some(window) = offsets.windows(2).find(|w| w[0] >= w[1]) {
            return Err(Error::malformed(format!(
                "paragraph offsets not strictly increasing: {} then {}",
                window[0], window[1]
            )));
        }

        let cursor = match offsets.last() {
            None => 0,
            Some(&last) => {
                if last >= source.len() && !(last == 0 && source.is_empty()) {
                    return Err(Error::malformed(format!(
                        "paragraph offset {last} beyond source length {}",
                        source.len()
                    )));
                }
                segmenter::next_paragraph_boundary(&source, last, sentence_limit).ok_or_else(
                    || {
                        Error::malformed(format!(
                            "no paragraph found at stored offset {last}; source changed?"
                        ))
                    },
                )?
            }
        };

        debug!(
            "Restored index: {} known paragraphs, cursor at {}",
            offsets.len(),
            cursor
        );

        Ok(Self {
            source,
            entries: offsets
                .iter()
                .map(|&start_offset| ParagraphEntry {
                    start_offset,
                    text: None,
                })
                .collect(),
            cursor,
            total_count,
            sentence_limit,
            changed: false,
        })
    }

    /// Paragraph `number` (zero-based), discovering forward as needed.
    ///
    /// Fails with `EndOfDocument` when the document ends before paragraph
    /// `number` can be produced; the failure is idempotent and leaves the
    /// index in its last consistent state.
    pub fn paragraph(&mut self, number: usize) -> Result<String> {
        while number >= self.entries.len() {
            self.discover_next(number)?;
        }

        if let Some(text) = self.entries[number].cached_text() {
            return Ok(text.to_string());
        }

        // Cache was dropped (or never filled after a restore): recompute
        // from the stored start offset without touching the cursor.
        let start = self.entries[number].start_offset;
        let (text, _) = segmenter::next_paragraph(&self.source, start, self.sentence_limit)
            .ok_or_else(|| {
                Error::malformed(format!(
                    "no paragraph at stored offset {start}; source changed?"
                ))
            })?;
        self.entries[number].text = Some(text.clone());
        Ok(text)
    }

    fn discover_next(&mut self, requested: usize) -> Result<()> {
        let start = self.cursor;
        match segmenter::next_paragraph(&self.source, start, self.sentence_limit) {
            Some((text, end)) => {
                debug!(
                    "Discovered paragraph {} at offset {start}..{end}",
                    self.entries.len()
                );
                self.entries.push(ParagraphEntry {
                    start_offset: start,
                    text: Some(text),
                });
                self.cursor = end;
                self.changed = true;
                Ok(())
            }
            None => Err(Error::EndOfDocument {
                requested,
                available: self.entries.len(),
            }),
        }
    }

    /// Total paragraphs in the whole document.
    ///
    /// Memoized; the first call runs one boundary-only scan over the full
    /// source with a local position, so discovery state is untouched.
    pub fn total_paragraph_count(&mut self) -> usize {
        if let Some(count) = self.total_count {
            return count;
        }

        let sentences = segmenter::count_sentences(&self.source);
        let count = sentences.div_ceil(self.sentence_limit);
        debug!("Counted {sentences} sentences -> {count} paragraphs");
        self.total_count = Some(count);
        count
    }

    /// Discard everything for a new document scan.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.cursor = 0;
        self.total_count = None;
        self.changed = true;
    }

    /// Drop all cached paragraph text, keeping offsets. Subsequent
    /// `paragraph` calls for known entries recompute from their offsets.
    pub fn evict_cached_text(&mut self) {
        for entry in &mut self.entries {
            entry.text = None;
        }
    }

    /// Number of paragraphs discovered so far (not the document total).
    pub fn discovered(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[ParagraphEntry] {
        &self.entries
    }

    pub fn start_offsets(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(ParagraphEntry::start_offset)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn sentence_limit(&self) -> usize {
        self.sentence_limit
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// True when entries were appended since the last `mark_saved`.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn mark_saved(&mut self) {
        self.changed = false;
    }
}
