//! Compilation errors.

use star_ir::ExprId;

/// Why a parse result could not be turned into a script.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("cannot compile a template with {count} parse error(s)")]
    HasParseErrors { count: usize },

    #[error("too many constants in one script (limit is {limit})")]
    TooManyConstants { limit: usize },

    #[error("jump of {distance} bytes does not fit in 16 bits")]
    JumpTooLarge { distance: usize },

    #[error("call with {count} arguments exceeds the limit of 255")]
    TooManyArguments { count: usize },

    #[error("section index {index} is larger than 255")]
    SectionIndexOutOfRange { index: u32 },

    #[error("expression {0:?} is not in the arena")]
    DanglingExpr(ExprId),
}
