//! Starscript lexer.
//!
//! Turns template source into tokens one at a time. A template is literal
//! text with embedded `{...}` expressions and `#N` section markers, so the
//! lexer runs in one of two modes depending on how many braces are open:
//!
//! - **Text mode** (no open braces): everything up to the next expression
//!   start (`{` not followed by `{`) or section marker (`#` followed by a
//!   digit) becomes one [`TokenKind::String`]. `{{` and `##` are escapes for
//!   a literal `{` and `#`.
//! - **Expression mode**: the usual expression tokens, with `{`/`}` moving
//!   the brace depth up and down.
//!
//! Lexing never fails. Problems are reported as [`TokenKind::Error`] tokens
//! carrying the message in their lexeme, and the parser turns those into
//! parse errors.
//!
//! [`TokenKind::String`]: star_ir::TokenKind::String
//! [`TokenKind::Error`]: star_ir::TokenKind::Error

mod cursor;
mod lexer;

pub use lexer::Lexer;

use star_ir::Token;

/// Lex a whole source, including the final `Eof` token.
///
/// The parser pulls tokens on demand; this is for tooling and tests.
pub fn lex_all(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}
