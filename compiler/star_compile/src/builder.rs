//! Mutable bytecode buffer.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use star_value::Value;

use crate::{CompileError, OpCode, Script};

/// Constant-pool indices are one byte.
pub(crate) const MAX_CONSTANTS: usize = 256;

/// Dedup key for pooled constants.
#[derive(Clone, PartialEq, Eq, Hash)]
enum ConstKey {
    /// Bit pattern, so `NaN` matches itself and `-0.0` stays apart from `0.0`.
    Number(u64),
    String(Arc<str>),
}

impl ConstKey {
    fn of(value: &Value) -> Option<ConstKey> {
        match value {
            Value::Number(n) => Some(ConstKey::Number(n.to_bits())),
            Value::String(s) => Some(ConstKey::String(Arc::clone(s))),
            _ => None,
        }
    }
}

/// Growable code buffer plus deduplicated constant pool.
#[derive(Default)]
pub struct ScriptBuilder {
    code: Vec<u8>,
    constants: Vec<Value>,
    pooled: FxHashMap<ConstKey, u8>,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        ScriptBuilder::default()
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn code(&self) -> &[u8] {
        &self.code
    }

    pub fn constants(&self) -> &[Value] {
        &self.constants
    }

    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.code.push(byte);
    }

    #[inline]
    pub fn write_op(&mut self, op: OpCode) {
        self.write_byte(op.as_byte());
    }

    pub fn write_op_byte(&mut self, op: OpCode, operand: u8) {
        self.write_op(op);
        self.write_byte(operand);
    }

    /// Pool `value` (reusing an equal entry) and return its index.
    pub fn add_constant(&mut self, value: Value) -> Result<u8, CompileError> {
        let key = ConstKey::of(&value);
        if let Some(index) = key.as_ref().and_then(|key| self.pooled.get(key)) {
            return Ok(*index);
        }

        let index = u8::try_from(self.constants.len()).map_err(|_| {
            CompileError::TooManyConstants {
                limit: MAX_CONSTANTS,
            }
        })?;
        self.constants.push(value);
        if let Some(key) = key {
            self.pooled.insert(key, index);
        }
        Ok(index)
    }

    /// Write `op` followed by the pool index of `value`.
    pub fn write_op_constant(&mut self, op: OpCode, value: Value) -> Result<(), CompileError> {
        let index = self.add_constant(value)?;
        self.write_op_byte(op, index);
        Ok(())
    }

    /// Write a jump with a placeholder offset; returns the operand position
    /// for [`patch_jump`](Self::patch_jump).
    pub fn write_jump(&mut self, op: OpCode) -> usize {
        self.write_op(op);
        self.write_byte(0xff);
        self.write_byte(0xff);
        self.code.len() - 2
    }

    /// Point the jump whose operand sits at `operand` to the current end.
    pub fn patch_jump(&mut self, operand: usize) -> Result<(), CompileError> {
        let distance = self.code.len() - operand - 2;
        let offset =
            u16::try_from(distance).map_err(|_| CompileError::JumpTooLarge { distance })?;
        let [hi, lo] = offset.to_be_bytes();
        self.code[operand] = hi;
        self.code[operand + 1] = lo;
        Ok(())
    }

    /// Freeze into an immutable script.
    pub fn into_script(self) -> Script {
        Script::new(self.code, self.constants)
    }
}
