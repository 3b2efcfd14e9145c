//! The compiled artifact.

use std::fmt::{self, Write as _};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use star_value::{already_disposed, script_disposed, EvalResult, Value};

use crate::{OpCode, Operands};

/// Immutable bytecode plus constant pool.
///
/// Clones share the same buffers and the same disposal flag: disposing any
/// clone disposes them all.
#[derive(Clone)]
pub struct Script {
    code: Arc<[u8]>,
    constants: Arc<[Value]>,
    disposed: Arc<AtomicBool>,
}

impl Script {
    pub fn new(code: Vec<u8>, constants: Vec<Value>) -> Self {
        Script {
            code: code.into(),
            constants: constants.into(),
            disposed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// Invalidate the script. Later reads fail; disposing twice is an error.
    pub fn dispose(&self) -> EvalResult<()> {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return Err(already_disposed());
        }
        tracing::debug!("disposed script");
        Ok(())
    }

    pub fn code(&self) -> EvalResult<&[u8]> {
        if self.is_disposed() {
            return Err(script_disposed());
        }
        Ok(&self.code)
    }

    pub fn constants(&self) -> EvalResult<&[Value]> {
        if self.is_disposed() {
            return Err(script_disposed());
        }
        Ok(&self.constants)
    }

    /// One line per instruction: offset, opcode, decoded operands.
    ///
    /// ```text
    /// 0000 ConstantAppend 0 "Hi "
    /// 0002 JumpIfFalse 4 -> 9
    /// 0005 End
    /// ```
    ///
    /// Fails once the script is disposed.
    pub fn disassemble(&self) -> EvalResult<String> {
        let code = self.code()?;
        let mut out = String::new();
        let mut ip = 0;

        while ip < code.len() {
            let byte = code[ip];
            let _ = write!(out, "{ip:04} ");
            let Some(op) = OpCode::from_byte(byte) else {
                let _ = writeln!(out, "<unknown 0x{byte:02x}>");
                ip += 1;
                continue;
            };
            let _ = write!(out, "{op}");

            let operand_start = ip + 1;
            let Some(operands) = code.get(operand_start..operand_start + op.operands().byte_len())
            else {
                out.push_str(" <truncated>\n");
                break;
            };
            match (op.operands(), operands) {
                (Operands::None, _) => {}
                (Operands::Constant, &[index]) => self.write_constant(&mut out, index),
                (Operands::ConstantPair, &[var, field]) => {
                    self.write_constant(&mut out, var);
                    self.write_constant(&mut out, field);
                }
                (Operands::Byte, &[value]) => {
                    let _ = write!(out, " {value}");
                }
                (Operands::Jump, &[hi, lo]) => {
                    let offset = u16::from_be_bytes([hi, lo]);
                    let target = operand_start + 2 + usize::from(offset);
                    let _ = write!(out, " {offset} -> {target}");
                }
                _ => {}
            }
            out.push('\n');
            ip = operand_start + operands.len();
        }
        Ok(out)
    }

    fn write_constant(&self, out: &mut String, index: u8) {
        match self.constants.get(usize::from(index)) {
            Some(Value::String(s)) => {
                let _ = write!(out, " {index} {s:?}");
            }
            Some(value) => {
                let _ = write!(out, " {index} {value}");
            }
            None => {
                let _ = write!(out, " {index} <missing>");
            }
        }
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Script")
            .field("code_len", &self.code.len())
            .field("constants", &self.constants.len())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
