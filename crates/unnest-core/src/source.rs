//! Immutable source snapshot with the boundary queries the planners need.

use crate::model::ByteSpan;

/// The original program text. Edits are planned against it and never
/// mutate it.
#[derive(Debug, Clone, Copy)]
pub struct SourceText<'a> {
    text: &'a str,
}

impl<'a> SourceText<'a> {
    #[must_use]
    pub const fn new(text: &'a str) -> Self {
        Self { text }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.text
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.text.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Offset of the first `ch` at or after `from`, skipping any text.
    #[must_use]
    pub fn locate_until(&self, from: usize, ch: char) -> Option<usize> {
        let tail = self.text.get(from..)?;
        tail.find(ch).map(|idx| from + idx)
    }

    /// Offset of `ch` when it is the first non-whitespace character at or
    /// after `from`.
    #[must_use]
    pub fn locate_after(&self, from: usize, ch: char) -> Option<usize> {
        let tail = self.text.get(from..)?;
        let (idx, found) = tail.char_indices().find(|(_, c)| !c.is_whitespace())?;
        (found == ch).then_some(from + idx)
    }

    /// Span of a `::` marker that follows `from` (whitespace allowed).
    #[must_use]
    pub fn locate_scope_marker(&self, from: usize) -> Option<ByteSpan> {
        let first = self.locate_after(from, ':')?;
        self.text
            .get(first..)
            .filter(|rest| rest.starts_with("::"))
            .map(|_| ByteSpan::new(first, first + 2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_until_skips_arbitrary_text() {
        let src = SourceText::new("class A : B { };");
        assert_eq!(src.locate_until(0, '{'), Some(12));
        assert_eq!(src.locate_until(13, '{'), None);
    }

    #[test]
    fn locate_after_only_skips_whitespace() {
        let src = SourceText::new("}  \n ;  } a;");
        assert_eq!(src.locate_after(1, ';'), Some(5));
        assert_eq!(src.locate_after(9, ';'), None);
    }

    #[test]
    fn locate_after_out_of_range_is_none() {
        let src = SourceText::new("abc");
        assert_eq!(src.locate_after(10, 'a'), None);
        assert_eq!(src.locate_after(3, 'a'), None);
    }

    #[test]
    fn scope_marker_tolerates_spacing() {
        let src = SourceText::new("A :: B");
        assert_eq!(src.locate_scope_marker(1), Some(ByteSpan::new(2, 4)));
        assert_eq!(SourceText::new("A : B").locate_scope_marker(1), None);
    }
}
