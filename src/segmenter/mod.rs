//! Sentence scanning and paragraph assembly.
//!
//! A paragraph is a fixed number of consecutive sentences (the sentence
//! limit), concatenated in source order and trimmed at the ends. The
//! boundary-only entry points let callers count or skip paragraphs without
//! materializing text.

use crate::source::TextSource;

pub mod normalization;
pub mod scanner;

pub use normalization::{simplify, simplify_into};

/// Sentences grouped into one paragraph unless configured otherwise.
pub const DEFAULT_SENTENCE_LIMIT: usize = 4;

/// Find the end offset of the next paragraph starting at `from`.
///
/// Consumes up to `sentence_limit` sentences; fewer only when the document
/// runs out (the final paragraph). Returns `None` when not even one
/// complete sentence remains.
pub fn next_paragraph_boundary<S: TextSource + ?Sized>(
    source: &S,
    from: usize,
    sentence_limit: usize,
) -> Option<usize> {
    let mut pos = from;
    let mut sentences = 0;

    for _ in 0..sentence_limit {
        match scanner::next_boundary(source, pos) {
            Some(end) => {
                pos = end;
                sentences += 1;
            }
            None => break,
        }
    }

    (sentences > 0).then_some(pos)
}

/// Materialize the next paragraph starting at `from`.
///
/// The returned text is trimmed of leading and trailing whitespace;
/// interior whitespace is preserved (see [`normalization`] for the
/// optional collapse step). The offset points at the first character
/// after the paragraph's last sentence.
pub fn next_paragraph<S: TextSource + ?Sized>(
    source: &S,
    from: usize,
    sentence_limit: usize,
) -> Option<(String, usize)> {
    let end = next_paragraph_boundary(source, from, sentence_limit)?;
    Some((source.slice(from, end).trim().to_string(), end))
}

/// Count the complete sentences in the whole source.
pub fn count_sentences<S: TextSource + ?Sized>(source: &S) -> usize {
    let mut pos = 0;
    let mut count = 0;
    while let Some(end) = scanner::next_boundary(source, pos) {
        pos = end;
        count += 1;
    }
    count
}
