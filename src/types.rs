//! Core types used throughout the project.

/// A position in a catalog file (0-indexed line, byte column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct SourcePosition {
    pub line: u32,
    pub character: u32,
}

/// Maps byte offsets in a document to line/column positions.
///
/// The reader only records byte offsets while parsing; diagnostics resolve
/// them through this index so messages can point at a line in the file.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset of the start of each line. Always contains 0.
    line_starts: Vec<usize>,
}

impl LineIndex {
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(offset + 1);
            }
        }
        Self { line_starts }
    }

    /// Resolves a byte offset to a position.
    ///
    /// Offsets past the end of the text resolve to the last line.
    #[must_use]
    pub fn position(&self, offset: usize) -> SourcePosition {
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        #[allow(clippy::cast_possible_truncation)]
        SourcePosition { line: line as u32, character: (offset - line_start) as u32 }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::start(0, 0, 0)]
    #[case::first_line(3, 0, 3)]
    #[case::line_break(6, 0, 6)]
    #[case::second_line_start(7, 1, 0)]
    #[case::second_line(10, 1, 3)]
    #[case::last_line(13, 2, 0)]
    fn test_position(#[case] offset: usize, #[case] line: u32, #[case] character: u32) {
        let index = LineIndex::new("abcdef\nghijk\n\nlast");

        assert_that!(index.position(offset), eq(SourcePosition { line, character }));
    }

    #[googletest::test]
    fn test_position_past_end_resolves_to_last_line() {
        let index = LineIndex::new("ab\ncd");

        expect_that!(index.position(100).line, eq(1));
    }

    #[googletest::test]
    fn test_empty_text() {
        let index = LineIndex::new("");

        expect_that!(index.position(0), eq(SourcePosition { line: 0, character: 0 }));
    }
}
