//! Character cursor over template source.
//!
//! Tracks byte position plus the line/column bookkeeping tokens carry.
//! Templates are mostly ASCII but literal text may hold any UTF-8, so the
//! cursor steps by `char`.

pub(crate) struct Cursor<'src> {
    source: &'src str,
    pos: usize,
    line: u32,
    column: u32,
    last: char,
}

impl<'src> Cursor<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        Cursor {
            source,
            pos: 0,
            line: 1,
            column: 0,
            last: '\0',
        }
    }

    #[inline]
    pub(crate) fn source(&self) -> &'src str {
        self.source
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    /// 1-based line of the cursor.
    #[inline]
    pub(crate) fn line(&self) -> u32 {
        self.line
    }

    /// 1-based column of the last consumed character on the current line.
    #[inline]
    pub(crate) fn column(&self) -> u32 {
        self.column
    }

    /// Last consumed character, `'\0'` at the start.
    #[inline]
    pub(crate) fn last(&self) -> char {
        self.last
    }

    /// Character under the cursor.
    #[inline]
    pub(crate) fn current(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    /// Character after the one under the cursor.
    #[inline]
    pub(crate) fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Consume one character.
    pub(crate) fn advance(&mut self) -> Option<char> {
        let c = self.current()?;
        self.pos += c.len_utf8();
        self.last = c;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consume the current character if it equals `expected`.
    pub(crate) fn eat(&mut self, expected: char) -> bool {
        if self.current() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume characters while `pred` holds.
    pub(crate) fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.current().is_some_and(&pred) {
            self.advance();
        }
    }

    /// Source text from `start` up to the cursor.
    #[inline]
    pub(crate) fn slice_from(&self, start: usize) -> &'src str {
        &self.source[start..self.pos]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
