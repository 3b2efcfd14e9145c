//! Dispatch loop.

use std::fmt::Write as _;

use star_compile::OpCode;
use star_ir::BinaryOp;
use star_value::{
    invalid_constant, not_callable, stack_underflow, truncated_bytecode, unknown_function,
    unknown_instruction, Engine, EvalResult, StringSegment, Value,
};
use tracing::trace;

use crate::operators::{evaluate_binary, evaluate_negate};
use crate::Vm;

/// Output being built during one run.
#[derive(Default)]
struct Output {
    buffer: String,
    finished: Vec<(u8, String)>,
    index: u8,
}

impl Output {
    /// Null appends nothing.
    fn append(&mut self, value: &Value) {
        match value {
            Value::Null => {}
            Value::String(s) => self.buffer.push_str(s),
            other => {
                let _ = write!(self.buffer, "{other}");
            }
        }
    }

    /// Close the current buffer and start section `index`. The empty buffer
    /// in front of the first marker is dropped.
    fn section(&mut self, index: u8) {
        if !self.finished.is_empty() || !self.buffer.is_empty() {
            let content = std::mem::take(&mut self.buffer);
            self.finished.push((self.index, content));
        }
        self.index = index;
    }

    fn finish(mut self) -> StringSegment {
        self.finished.push((self.index, self.buffer));
        StringSegment::from_parts(self.finished)
            .unwrap_or_else(|| StringSegment::new(0, String::new()))
    }
}

/// Instruction pointer over one script's code and constants.
struct Reader<'a> {
    code: &'a [u8],
    constants: &'a [Value],
    ip: usize,
}

impl<'a> Reader<'a> {
    #[inline]
    fn byte(&mut self) -> EvalResult<u8> {
        let byte = *self
            .code
            .get(self.ip)
            .ok_or_else(|| truncated_bytecode(self.ip))?;
        self.ip += 1;
        Ok(byte)
    }

    #[inline]
    fn u16(&mut self) -> EvalResult<u16> {
        let hi = self.byte()?;
        let lo = self.byte()?;
        Ok(u16::from_be_bytes([hi, lo]))
    }

    fn constant(&mut self) -> EvalResult<&'a Value> {
        let index = self.byte()?;
        self.constants
            .get(usize::from(index))
            .ok_or_else(|| invalid_constant(index))
    }

    /// A constant operand that must be a string (variable and field names).
    fn name(&mut self) -> EvalResult<&'a str> {
        let index = self.code.get(self.ip).copied().unwrap_or_default();
        self.constant()?
            .as_str()
            .ok_or_else(|| invalid_constant(index))
    }

    fn jump(&mut self, offset: u16) {
        self.ip += usize::from(offset);
    }
}

/// Field `name` of `value` if it is a map; null otherwise.
fn field(value: &Value, name: &str) -> Value {
    let Value::Map(map) = value else {
        return Value::Null;
    };
    // Release the lock before running the supplier.
    let supplier = map.read().supplier(name);
    supplier.map_or(Value::Null, |supplier| supplier())
}

fn binary_op(op: OpCode) -> Option<BinaryOp> {
    Some(match op {
        OpCode::Add => BinaryOp::Add,
        OpCode::Subtract => BinaryOp::Sub,
        OpCode::Multiply => BinaryOp::Mul,
        OpCode::Divide => BinaryOp::Div,
        OpCode::Modulo => BinaryOp::Mod,
        OpCode::Power => BinaryOp::Pow,
        OpCode::LeftShift => BinaryOp::Shl,
        OpCode::RightShift => BinaryOp::Shr,
        OpCode::Equals => BinaryOp::Eq,
        OpCode::NotEquals => BinaryOp::NotEq,
        OpCode::Greater => BinaryOp::Gt,
        OpCode::GreaterEqual => BinaryOp::GtEq,
        OpCode::Less => BinaryOp::Lt,
        OpCode::LessEqual => BinaryOp::LtEq,
        _ => return None,
    })
}

impl Vm {
    pub(crate) fn execute(&mut self, code: &[u8], constants: &[Value]) -> EvalResult<StringSegment> {
        let mut reader = Reader {
            code,
            constants,
            ip: 0,
        };
        let mut out = Output::default();

        loop {
            let offset = reader.ip;
            let byte = reader.byte()?;
            let op = OpCode::from_byte(byte).ok_or_else(|| unknown_instruction(byte, offset))?;
            trace!(target: "star_eval::vm", offset, ?op, depth = self.stack.len());

            if let Some(bin) = binary_op(op) {
                let right = self.pop()?;
                let left = self.pop()?;
                self.push(evaluate_binary(left, right, bin)?);
                continue;
            }

            match op {
                OpCode::Constant => {
                    let value = reader.constant()?.clone();
                    self.push(value);
                }
                OpCode::Null => self.push(Value::Null),
                OpCode::True => self.push(Value::Boolean(true)),
                OpCode::False => self.push(Value::Boolean(false)),
                OpCode::AddConstant => {
                    let right = reader.constant()?.clone();
                    let left = self.pop()?;
                    self.push(evaluate_binary(left, right, BinaryOp::Add)?);
                }

                OpCode::Pop => {
                    self.pop()?;
                }
                OpCode::Not => {
                    let value = self.pop()?;
                    self.push(Value::Boolean(!value.is_truthy()));
                }
                OpCode::Negate => {
                    let value = self.pop()?;
                    self.push(evaluate_negate(&value)?);
                }

                OpCode::Variable => {
                    let value = self.variable(reader.name()?);
                    self.push(value);
                }
                OpCode::Get => {
                    let name = reader.name()?;
                    let object = self.pop()?;
                    self.push(field(&object, name));
                }
                OpCode::VariableGet => {
                    let value = self.variable_get(&mut reader)?;
                    self.push(value);
                }
                OpCode::Call => {
                    let argc = reader.byte()?;
                    let result = self.call(argc)?;
                    self.push(result);
                }

                OpCode::Jump => {
                    let offset = reader.u16()?;
                    reader.jump(offset);
                }
                OpCode::JumpIfTrue => {
                    let offset = reader.u16()?;
                    if self.peek(0)?.is_truthy() {
                        reader.jump(offset);
                    }
                }
                OpCode::JumpIfFalse => {
                    let offset = reader.u16()?;
                    if !self.peek(0)?.is_truthy() {
                        reader.jump(offset);
                    }
                }

                OpCode::Section => out.section(reader.byte()?),
                OpCode::Append => {
                    let value = self.pop()?;
                    out.append(&value);
                }
                OpCode::ConstantAppend => out.append(reader.constant()?),
                OpCode::VariableAppend => {
                    let value = self.variable(reader.name()?);
                    out.append(&value);
                }
                OpCode::GetAppend => {
                    let name = reader.name()?;
                    let object = self.pop()?;
                    out.append(&field(&object, name));
                }
                OpCode::VariableGetAppend => {
                    let value = self.variable_get(&mut reader)?;
                    out.append(&value);
                }
                OpCode::CallAppend => {
                    let argc = reader.byte()?;
                    let result = self.call(argc)?;
                    out.append(&result);
                }

                OpCode::End => return Ok(out.finish()),

                // Handled above.
                OpCode::Add
                | OpCode::Subtract
                | OpCode::Multiply
                | OpCode::Divide
                | OpCode::Modulo
                | OpCode::Power
                | OpCode::LeftShift
                | OpCode::RightShift
                | OpCode::Equals
                | OpCode::NotEquals
                | OpCode::Greater
                | OpCode::GreaterEqual
                | OpCode::Less
                | OpCode::LessEqual => {}
            }
        }
    }

    fn variable_get(&self, reader: &mut Reader<'_>) -> EvalResult {
        let object = self.variable(reader.name()?);
        let name = reader.name()?;
        Ok(field(&object, name))
    }

    /// Invoke the function sitting below `argc` arguments.
    ///
    /// The function pops its own arguments; whatever it leaves behind is
    /// discarded along with the callee.
    fn call(&mut self, argc: u8) -> EvalResult {
        let callee = self.peek(usize::from(argc))?;
        let function = match callee {
            Value::Function(function) => function,
            Value::Null => return Err(unknown_function()),
            other => return Err(not_callable(other.kind())),
        };
        let base = self.stack.len() - usize::from(argc) - 1;

        let result = function.call(self, argc)?;

        if self.stack.len() <= base {
            return Err(stack_underflow());
        }
        self.stack.truncate(base);
        Ok(result)
    }
}
