//! Optional whitespace simplification for display and teleprompter output.
//!
//! Segmentation never normalizes: paragraph text keeps its interior
//! whitespace so cached and recomputed entries stay byte-identical.
//! Callers opt into this step after retrieval.

/// Collapse interior whitespace runs to single spaces and trim the ends.
pub fn simplify(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    simplify_into(text, &mut result);
    result
}

/// Simplify into a supplied buffer for reuse across paragraphs.
pub fn simplify_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    let mut prev_was_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            // \r\n, \n, tabs and runs of spaces all collapse to one space.
            if !prev_was_space {
                buffer.push(' ');
                prev_was_space = true;
            }
        } else {
            buffer.push(ch);
            prev_was_space = false;
        }
    }

    let trimmed_len = buffer.trim_end().len();
    buffer.truncate(trimmed_len);
    if buffer.starts_with(' ') {
        buffer.remove(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplify_line_breaks() {
        let input = "This is a\nsentence with\r\nline breaks.";
        assert_eq!(simplify(input), "This is a sentence with line breaks.");
    }

    #[test]
    fn test_simplify_collapses_runs() {
        assert_eq!(simplify("Multiple\n\n\nspaces\r\n\r\n   here."), "Multiple spaces here.");
        assert_eq!(simplify("Text\twith\t\ttabs."), "Text with tabs.");
    }

    #[test]
    fn test_simplify_trims_ends() {
        assert_eq!(simplify("  padded text  "), "padded text");
    }

    #[test]
    fn test_simplify_empty_and_blank() {
        assert_eq!(simplify(""), "");
        assert_eq!(simplify(" \t\n "), "");
    }

    #[test]
    fn test_simplify_into_buffer_reuse() {
        let mut buffer = String::new();

        simplify_into("Line one.\nLine two.", &mut buffer);
        assert_eq!(buffer, "Line one. Line two.");

        simplify_into("Different\r\ncontent.", &mut buffer);
        assert_eq!(buffer, "Different content.");
    }

    #[test]
    fn test_simplify_unicode() {
        assert_eq!(simplify("Unicode\n世界\r\nhere."), "Unicode 世界 here.");
    }
}
