//! Instruction set.

use std::fmt;

/// One-byte instruction tag.
///
/// Operands follow the tag inline. Constant operands are one-byte indices
/// into the script's constant pool; jump operands are two bytes, big-endian,
/// counted from the byte after the operand.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    /// `idx` push constant
    Constant,
    Null,
    True,
    False,

    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
    LeftShift,
    RightShift,
    /// `idx` add a constant to the top of the stack
    AddConstant,

    Pop,
    Not,
    Negate,

    Equals,
    NotEquals,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    /// `idx` push the variable named by the constant
    Variable,
    /// `idx` replace the top of the stack with its named field
    Get,
    /// `argc`
    Call,

    /// `hi lo`
    Jump,
    /// `hi lo` jump if the top of the stack is truthy, without popping
    JumpIfTrue,
    /// `hi lo` jump if the top of the stack is falsy, without popping
    JumpIfFalse,

    /// `index` start a new output section
    Section,
    /// pop and append to the output
    Append,
    /// `idx`
    ConstantAppend,
    /// `idx`
    VariableAppend,
    /// `idx`
    GetAppend,
    /// `argc`
    CallAppend,
    /// `var_idx field_idx`
    VariableGet,
    /// `var_idx field_idx`
    VariableGetAppend,

    End,
}

/// Shape of the bytes following an opcode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operands {
    None,
    /// One constant-pool index.
    Constant,
    /// Two constant-pool indices (variable name, field name).
    ConstantPair,
    /// One raw byte (argument count or section index).
    Byte,
    /// Big-endian u16 forward offset.
    Jump,
}

impl Operands {
    /// Number of operand bytes.
    pub const fn byte_len(self) -> usize {
        match self {
            Self::None => 0,
            Self::Constant | Self::Byte => 1,
            Self::ConstantPair | Self::Jump => 2,
        }
    }
}

impl OpCode {
    /// Every opcode, indexed by its byte value.
    pub const ALL: [OpCode; 37] = [
        OpCode::Constant,
        OpCode::Null,
        OpCode::True,
        OpCode::False,
        OpCode::Add,
        OpCode::Subtract,
        OpCode::Multiply,
        OpCode::Divide,
        OpCode::Modulo,
        OpCode::Power,
        OpCode::LeftShift,
        OpCode::RightShift,
        OpCode::AddConstant,
        OpCode::Pop,
        OpCode::Not,
        OpCode::Negate,
        OpCode::Equals,
        OpCode::NotEquals,
        OpCode::Greater,
        OpCode::GreaterEqual,
        OpCode::Less,
        OpCode::LessEqual,
        OpCode::Variable,
        OpCode::Get,
        OpCode::Call,
        OpCode::Jump,
        OpCode::JumpIfTrue,
        OpCode::JumpIfFalse,
        OpCode::Section,
        OpCode::Append,
        OpCode::ConstantAppend,
        OpCode::VariableAppend,
        OpCode::GetAppend,
        OpCode::CallAppend,
        OpCode::VariableGet,
        OpCode::VariableGetAppend,
        OpCode::End,
    ];

    #[inline]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn from_byte(byte: u8) -> Option<OpCode> {
        Self::ALL.get(usize::from(byte)).copied()
    }

    pub const fn operands(self) -> Operands {
        match self {
            Self::Constant
            | Self::AddConstant
            | Self::Variable
            | Self::Get
            | Self::ConstantAppend
            | Self::VariableAppend
            | Self::GetAppend => Operands::Constant,
            Self::VariableGet | Self::VariableGetAppend => Operands::ConstantPair,
            Self::Call | Self::CallAppend | Self::Section => Operands::Byte,
            Self::Jump | Self::JumpIfTrue | Self::JumpIfFalse => Operands::Jump,
            _ => Operands::None,
        }
    }

    /// Instruction length including the opcode byte.
    pub const fn width(self) -> usize {
        1 + self.operands().byte_len()
    }
}

impl TryFrom<u8> for OpCode {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        OpCode::from_byte(byte).ok_or(byte)
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
