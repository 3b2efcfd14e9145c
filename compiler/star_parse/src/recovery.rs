//! Error recovery.
//!
//! After a syntax error inside `{...}` the rest of that expression is
//! meaningless, so the parser skips tokens until every brace it had entered
//! is closed again. Text and sections after the broken expression parse
//! normally.

use star_ir::TokenKind;

use crate::Parser;

impl Parser<'_> {
    /// Skip to just past the `}` that closes the outermost open block.
    ///
    /// Does nothing when the error happened outside any braces.
    pub(crate) fn synchronize(&mut self) {
        while self.depth > 0 && !self.cursor.is_at_end() {
            match self.cursor.current_kind() {
                TokenKind::LeftBrace => self.depth += 1,
                TokenKind::RightBrace => self.depth -= 1,
                _ => {}
            }
            self.cursor.advance();
        }
        self.depth = 0;
    }
}
