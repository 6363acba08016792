use crate::source::TextSource;

/// Characters that terminate a sentence.
pub const TERMINATORS: &[char] = &['!', '?', '.'];

/// Closing-quote characters that belong to the sentence they follow.
/// U+201D is the right double quotation mark.
pub const CLOSING_QUOTES: &[char] = &['"', '\'', '\u{201D}', '`'];

pub fn is_terminator(ch: char) -> bool {
    TERMINATORS.contains(&ch)
}

pub fn is_closing_quote(ch: char) -> bool {
    CLOSING_QUOTES.contains(&ch)
}

/// Find the end offset of the next complete sentence starting at `from`.
///
/// The sentence runs up to and including a terminator, extended by trailing
/// punctuation (see `absorb_trailing`). Returns `None` when the source ends
/// before a terminator is read: a trailing unterminated fragment is
/// discarded rather than returned as a partial sentence.
pub fn next_boundary<S: TextSource + ?Sized>(source: &S, from: usize) -> Option<usize> {
    let mut pos = from;
    loop {
        let ch = source.read_char_at(pos)?;
        pos += 1;
        if is_terminator(ch) {
            return Some(absorb_trailing(source, pos));
        }
    }
}

/// Consume punctuation that still belongs to the finished sentence.
///
/// Further terminators are consumed greedily (`?!`, `...`); the first
/// closing quote is consumed and ends the sentence; any other character is
/// left unconsumed as the start of the next sentence.
fn absorb_trailing<S: TextSource + ?Sized>(source: &S, mut pos: usize) -> usize {
    while let Some(ch) = source.read_char_at(pos) {
        if is_terminator(ch) {
            pos += 1;
            continue;
        }
        if is_closing_quote(ch) {
            pos += 1;
        }
        break;
    }
    pos
}

/// Materialize the next complete sentence starting at `from`.
///
/// Returns the sentence text (untrimmed, exactly as it appears in the
/// source) and the offset of the first character after it.
pub fn next_sentence<S: TextSource + ?Sized>(source: &S, from: usize) -> Option<(String, usize)> {
    let end = next_boundary(source, from)?;
    Some((source.slice(from, end), end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemorySource;

    fn sentence(text: &str, from: usize) -> Option<(String, usize)> {
        next_sentence(&InMemorySource::new(text), from)
    }

    #[test]
    fn test_plain_sentence_ends_at_terminator() {
        let (text, end) = sentence("Stop. Go.", 0).unwrap();
        assert_eq!(text, "Stop.");
        assert_eq!(end, 5);
    }

    #[test]
    fn test_second_sentence_keeps_leading_whitespace() {
        let (text, end) = sentence("Stop. Go.", 5).unwrap();
        assert_eq!(text, " Go.");
        assert_eq!(end, 9);
    }

    #[test]
    fn test_trailing_quote_is_absorbed() {
        let (text, end) = sentence("\"Quoted.\" Next one.", 0).unwrap();
        assert_eq!(text, "\"Quoted.\"");
        assert_eq!(end, 9);
    }

    #[test]
    fn test_smart_quote_and_backtick_absorbed() {
        let (text, _) = sentence("She said \u{201C}go.\u{201D} Fine.", 0).unwrap();
        assert_eq!(text, "She said \u{201C}go.\u{201D}");

        let (text, _) = sentence("`Odd.` Sure.", 0).unwrap();
        assert_eq!(text, "`Odd.`");
    }

    #[test]
    fn test_consecutive_terminators_absorbed() {
        let (text, end) = sentence("He left?! Then ran.", 0).unwrap();
        assert_eq!(text, "He left?!");
        assert_eq!(end, 9);

        let (text, _) = sentence("Wait... done.", 0).unwrap();
        assert_eq!(text, "Wait...");
    }

    #[test]
    fn test_quote_ends_absorption() {
        // The quote closes the sentence even with punctuation after it.
        let (text, end) = sentence("No.\".", 0).unwrap();
        assert_eq!(text, "No.\"");
        assert_eq!(end, 4);
        let (text, _) = sentence("No.\".", end).unwrap();
        assert_eq!(text, ".");
    }

    #[test]
    fn test_abbreviations_are_not_special() {
        // "Mr." always ends a sentence; an accepted limitation.
        let (text, _) = sentence("Mr. Smith arrived.", 0).unwrap();
        assert_eq!(text, "Mr.");
    }

    #[test]
    fn test_trailing_fragment_is_discarded() {
        let source = InMemorySource::new("Complete. Incomplete frag");
        let (text, end) = next_sentence(&source, 0).unwrap();
        assert_eq!(text, "Complete.");
        assert_eq!(next_boundary(&source, end), None);
    }

    #[test]
    fn test_empty_source_has_no_sentence() {
        assert_eq!(sentence("", 0), None);
        assert_eq!(sentence("   ", 0), None);
    }

    #[test]
    fn test_terminator_at_end_of_source() {
        let (text, end) = sentence("Last one.", 0).unwrap();
        assert_eq!(text, "Last one.");
        assert_eq!(end, 9);
        assert_eq!(sentence("Last one.", end), None);
    }

    #[test]
    fn test_unicode_offsets_are_character_counts() {
        let (text, end) = sentence("日本語だ. Next.", 0).unwrap();
        assert_eq!(text, "日本語だ.");
        assert_eq!(end, 5);
    }
}
