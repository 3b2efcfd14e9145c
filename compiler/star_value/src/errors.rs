//! Runtime error types.
//!
//! `EvalErrorKind` gives each failure a typed category; the factory
//! functions below are the public way to build errors and fill in both
//! `kind` and `message`.

use std::fmt;

use star_ir::BinaryOp;

use crate::function::ArgType;
use crate::value::{Value, ValueKind};

/// Result of evaluation.
pub type EvalResult<T = Value> = Result<T, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Operators
    /// `+` with operands that are neither two numbers nor a string on the left.
    InvalidAdd,
    /// Arithmetic, shift or ordering operator applied to non-numbers.
    NumbersRequired { op: BinaryOp },
    /// Unary `-` applied to a non-number.
    NegateRequiresNumber,

    // Calls
    /// Callee resolved to null.
    UnknownFunction,
    /// Callee resolved to something other than a function.
    NotCallable { kind: ValueKind },
    /// Host function called with the wrong number of arguments.
    ArgumentCount {
        name: String,
        expected: String,
        got: u8,
    },
    /// Host function argument of the wrong kind.
    ArgumentType {
        name: String,
        position: u8,
        expected: ArgType,
    },

    // Machine
    StackUnderflow,
    UnknownInstruction { byte: u8, offset: usize },
    TruncatedBytecode { offset: usize },
    InvalidConstant { index: u8 },
    ScriptDisposed,
    AlreadyDisposed,
    EmptyScript,

    /// Catch-all, used by `EvalError::new` and host functions.
    Custom { message: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAdd => {
                write!(f, "Can only add 2 numbers, or 1 string and any other value.")
            }
            Self::NumbersRequired { op } => match op {
                BinaryOp::Sub => write!(f, "Can only subtract 2 numbers."),
                BinaryOp::Mul => write!(f, "Can only multiply 2 numbers."),
                BinaryOp::Div => write!(f, "Can only divide 2 numbers."),
                BinaryOp::Mod => write!(f, "Can only modulo 2 numbers."),
                BinaryOp::Pow => write!(f, "Can only power 2 numbers."),
                other => write!(f, "{} operation requires 2 numbers.", other.as_symbol()),
            },
            Self::NegateRequiresNumber => write!(f, "Negation requires a number."),

            Self::UnknownFunction => write!(f, "Unknown function."),
            Self::NotCallable { kind } => {
                write!(f, "Tried to call {kind}, can only call functions.")
            }
            Self::ArgumentCount {
                name,
                expected,
                got,
            } => write!(f, "{name}() requires {expected}, got {got}."),
            Self::ArgumentType {
                name,
                position,
                expected,
            } => write!(
                f,
                "Argument {position} of {name}() needs to be a {}.",
                expected.friendly_name()
            ),

            Self::StackUnderflow => write!(f, "Operand stack underflow."),
            Self::UnknownInstruction { byte, offset } => {
                write!(f, "Unknown instruction 0x{byte:02x} at offset {offset}.")
            }
            Self::TruncatedBytecode { offset } => {
                write!(f, "Bytecode ended unexpectedly at offset {offset}.")
            }
            Self::InvalidConstant { index } => {
                write!(f, "Constant index {index} is out of range.")
            }
            Self::ScriptDisposed => write!(f, "Cannot execute a disposed script."),
            Self::AlreadyDisposed => write!(f, "Cannot dispose an already disposed script."),
            Self::EmptyScript => write!(f, "Attempted to execute a script with no bytecode."),

            Self::Custom { message } => f.write_str(message),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable error message, equal to `kind.to_string()`.
    pub message: String,
}

impl EvalError {
    /// Create an error with just a message.
    ///
    /// Uses `Custom` kind. Host functions use this for their own failures.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        EvalError {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
        }
    }

    /// Create an error from a structured kind.
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError { kind, message }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

// Factory functions

#[cold]
pub fn invalid_add() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidAdd)
}

#[cold]
pub fn numbers_required(op: BinaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NumbersRequired { op })
}

#[cold]
pub fn negate_requires_number() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NegateRequiresNumber)
}

#[cold]
pub fn unknown_function() -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownFunction)
}

#[cold]
pub fn not_callable(kind: ValueKind) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable { kind })
}

#[cold]
pub fn argument_count(name: &str, expected: String, got: u8) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArgumentCount {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn argument_type(name: &str, position: u8, expected: ArgType) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArgumentType {
        name: name.to_string(),
        position,
        expected,
    })
}

#[cold]
pub fn stack_underflow() -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackUnderflow)
}

#[cold]
pub fn unknown_instruction(byte: u8, offset: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownInstruction { byte, offset })
}

#[cold]
pub fn truncated_bytecode(offset: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TruncatedBytecode { offset })
}

#[cold]
pub fn invalid_constant(index: u8) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidConstant { index })
}

#[cold]
pub fn script_disposed() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ScriptDisposed)
}

#[cold]
pub fn already_disposed() -> EvalError {
    EvalError::from_kind(EvalErrorKind::AlreadyDisposed)
}

#[cold]
pub fn empty_script() -> EvalError {
    EvalError::from_kind(EvalErrorKind::EmptyScript)
}
