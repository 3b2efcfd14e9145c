//! Parser phase tests.
//!
//! Tests for the `star_lexer` and `star_parse` crates through the facade:
//! - Token streams for whole templates
//! - Error collection and recovery across blocks
//! - Variable replacement before compilation

mod lexer;
mod recovery;
mod replace;
