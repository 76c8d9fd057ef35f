/// A position in a source document, resolved to a line and column.
///
/// Lines and columns count from 1. Tabs count as four columns, and the stored
/// line source has them expanded to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorLocation {
    offset: usize,
    line: usize,
    column: usize,
    length: Option<usize>,
    line_source: String,
}

impl ErrorLocation {
    /// # Panics
    ///
    /// Panics if `offset` lies past the end of `source`, or if `length` is
    /// zero, runs past the end of `source` or crosses a line break.
    fn new(source: &str, offset: usize, length: Option<usize>) -> Self {
        // an offset equal to the length points at end of input
        assert!(
            offset <= source.len(),
            "offset ({offset}) must be less than or equal to the length of the source ({})",
            source.len()
        );

        if let Some(length) = length {
            let end = offset + length;
            assert!(length > 0, "length must not be 0");
            assert!(
                end <= source.len(),
                "offset + length ({end}) must be less than or equal to the length of the source ({})",
                source.len()
            );
            assert!(
                !source[offset..end].contains('\n'),
                "span ({:?}) must not contain newlines",
                &source[offset..end]
            );
        }

        let before = &source[..offset];
        let (line_index, line_start) = before
            .match_indices('\n')
            .enumerate()
            .last()
            .map_or((0, 0), |(index, (newline, _))| (index + 1, newline + 1));

        let column = before[line_start..]
            .chars()
            .map(|c| if c == '\t' { 4 } else { 1 })
            .sum::<usize>()
            + 1;

        let line_end = source[line_start..]
            .find('\n')
            .map_or(source.len(), |newline| line_start + newline);
        let line_source = source[line_start..line_end]
            .trim_end_matches('\r')
            .replace('\t', "    ");

        Self {
            offset,
            line: line_index + 1,
            column,
            length,
            line_source,
        }
    }

    /// Locates a single character at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset` lies past the end of `source`.
    #[must_use]
    pub fn from_source_and_offset(source: &str, offset: usize) -> Self {
        Self::new(source, offset, None)
    }

    /// Locates `length` bytes starting at `offset`, such as an attribute
    /// name.
    ///
    /// # Panics
    ///
    /// Panics if the span is empty, does not fit in `source` or crosses a
    /// line break.
    #[must_use]
    pub fn from_source_and_span(source: &str, offset: usize, length: usize) -> Self {
        Self::new(source, offset, Some(length))
    }

    /// Byte offset into the source.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the line number (1-indexed)
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Returns the column number (1-indexed)
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Number of characters to highlight, 1 for a bare offset.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length.unwrap_or(1)
    }

    /// The full line containing the location, tabs expanded.
    #[must_use]
    pub fn line_source(&self) -> &str {
        &self.line_source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line() {
        let source = "<model>";
        let location = ErrorLocation::from_source_and_offset(source, 1);

        assert_eq!(location.line(), 1);
        assert_eq!(location.column(), 2);
        assert_eq!(location.length(), 1);
        assert_eq!(location.line_source(), "<model>");
    }

    #[test]
    fn later_line() {
        let source = "<model>\n  <component name=\"a\">\n</model>";
        let offset = source.find("name").expect("source contains `name`");
        let location = ErrorLocation::from_source_and_span(source, offset, 4);

        assert_eq!(location.line(), 2);
        assert_eq!(location.column(), 14);
        assert_eq!(location.length(), 4);
        assert_eq!(location.line_source(), "  <component name=\"a\">");
    }

    #[test]
    fn tabs_are_expanded() {
        let source = "\t<component/>";
        let location = ErrorLocation::from_source_and_offset(source, 1);

        assert_eq!(location.column(), 5);
        assert_eq!(location.line_source(), "    <component/>");
    }

    #[test]
    fn end_of_input() {
        let source = "<model>\n";
        let location = ErrorLocation::from_source_and_offset(source, source.len());

        assert_eq!(location.line(), 2);
        assert_eq!(location.column(), 1);
        assert_eq!(location.line_source(), "");
    }

    #[test]
    #[should_panic(expected = "must be less than or equal to the length of the source")]
    fn offset_past_end() {
        let _ = ErrorLocation::from_source_and_offset("abc", 4);
    }
}
