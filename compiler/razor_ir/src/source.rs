//! Document text and the seekable character cursor the tokenizers read from.
//!
//! Positions are absolute byte offsets into the document. The cursor moves
//! one `char` at a time and can be repositioned anywhere on a char boundary,
//! which is what backtracking and tokenizer resets rely on.

use std::sync::Arc;

use crate::Span;

/// A zero-based line/column pair. Columns count `char`s, not bytes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct SourceLocation {
    pub absolute_index: u32,
    pub line: u32,
    pub column: u32,
}

/// Immutable document text with a precomputed line table.
#[derive(Clone, Debug)]
pub struct SourceText {
    text: Arc<str>,
    /// Byte offset of the first character of every line.
    line_starts: Vec<u32>,
}

impl SourceText {
    /// Create a source text, indexing line starts.
    ///
    /// `\r\n`, `\n`, `\r`, U+0085, U+2028 and U+2029 all end a line.
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        let text: Arc<str> = text.into();
        let mut line_starts = vec![0];
        let mut chars = text.char_indices().peekable();
        while let Some((idx, c)) = chars.next() {
            let next_line = match c {
                '\r' => {
                    if let Some(&(_, '\n')) = chars.peek() {
                        chars.next();
                        Some(idx + 2)
                    } else {
                        Some(idx + 1)
                    }
                }
                '\n' => Some(idx + 1),
                '\u{85}' | '\u{2028}' | '\u{2029}' => Some(idx + c.len_utf8()),
                _ => None,
            };
            if let Some(start) = next_line {
                line_starts.push(offset_u32(start));
            }
        }
        SourceText { text, line_starts }
    }

    /// The full document text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length of the document in bytes.
    #[inline]
    pub fn len(&self) -> u32 {
        offset_u32(self.text.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of lines (an empty document has one line).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Slice of the document covered by `span`.
    pub fn slice(&self, span: Span) -> &str {
        self.text.get(span.to_range()).unwrap_or("")
    }

    /// Map an absolute byte offset to line and column.
    ///
    /// Offsets past the end clamp to the end of the document.
    pub fn location(&self, offset: u32) -> SourceLocation {
        let offset = offset.min(self.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(insert) => insert - 1,
        };
        let line_start = self.line_starts[line] as usize;
        let column = self
            .text
            .get(line_start..offset as usize)
            .map_or(0, |s| s.chars().count());
        SourceLocation {
            absolute_index: offset,
            line: offset_u32(line),
            column: offset_u32(column),
        }
    }

    /// Map a line/column pair back to an absolute byte offset.
    ///
    /// Returns `None` when the line does not exist or the column runs past
    /// the end of the line.
    pub fn offset_of(&self, line: u32, column: u32) -> Option<u32> {
        let start = *self.line_starts.get(line as usize)? as usize;
        let end = self
            .line_starts
            .get(line as usize + 1)
            .map_or(self.text.len(), |&e| e as usize);
        let mut chars = self.text[start..end].char_indices();
        if column == 0 {
            return Some(offset_u32(start));
        }
        let mut seen = 0;
        for (idx, _) in chars.by_ref() {
            if seen == column {
                return Some(offset_u32(start + idx));
            }
            seen += 1;
        }
        (seen == column).then(|| offset_u32(end))
    }

    /// Create a cursor positioned at the start of the document.
    pub fn cursor(&self) -> SourceCursor<'_> {
        SourceCursor::new(&self.text)
    }
}

/// Seekable, position-addressable character stream.
///
/// `peek` returns `'\0'` at end of input; use [`SourceCursor::is_eof`] to
/// tell an interior NUL from the end sentinel.
#[derive(Clone, Debug)]
pub struct SourceCursor<'src> {
    text: &'src str,
    pos: usize,
}

/// Character returned by `peek`/`read` once the cursor is exhausted.
pub const EOF_CHAR: char = '\0';

impl<'src> SourceCursor<'src> {
    pub fn new(text: &'src str) -> Self {
        SourceCursor { text, pos: 0 }
    }

    /// The text the cursor reads from.
    #[inline]
    pub fn text(&self) -> &'src str {
        self.text
    }

    /// Current absolute byte offset.
    #[inline]
    pub fn position(&self) -> u32 {
        offset_u32(self.pos)
    }

    /// Move the cursor to an absolute byte offset.
    ///
    /// Offsets past the end clamp to the end. Offsets inside a multi-byte
    /// character snap back to the start of that character.
    pub fn set_position(&mut self, position: u32) {
        let mut pos = (position as usize).min(self.text.len());
        while !self.text.is_char_boundary(pos) {
            pos -= 1;
        }
        self.pos = pos;
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Current character without consuming it.
    #[inline]
    pub fn peek(&self) -> char {
        self.text[self.pos..].chars().next().unwrap_or(EOF_CHAR)
    }

    /// Character `n` positions ahead of the current one (`peek_at(0) == peek()`).
    pub fn peek_at(&self, n: usize) -> char {
        self.text[self.pos..].chars().nth(n).unwrap_or(EOF_CHAR)
    }

    /// Consume and return the current character.
    #[inline]
    pub fn read(&mut self) -> char {
        match self.text[self.pos..].chars().next() {
            Some(c) => {
                self.pos += c.len_utf8();
                c
            }
            None => EOF_CHAR,
        }
    }

    /// Check whether the remaining input starts with `s`.
    #[inline]
    pub fn starts_with(&self, s: &str) -> bool {
        self.text[self.pos..].starts_with(s)
    }

    /// Unconsumed input.
    #[inline]
    pub fn remainder(&self) -> &'src str {
        &self.text[self.pos..]
    }

    /// Advance by `len` bytes (clamped to the end of input).
    pub fn advance_bytes(&mut self, len: usize) {
        self.set_position(offset_u32(self.pos + len));
    }

    /// Text between `start` and the current position.
    pub fn slice_from(&self, start: u32) -> &'src str {
        self.text.get(start as usize..self.pos).unwrap_or("")
    }
}

/// Convert a byte offset to `u32`, saturating for documents over 4 GiB.
#[inline]
pub fn offset_u32(offset: usize) -> u32 {
    u32::try_from(offset).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests;
