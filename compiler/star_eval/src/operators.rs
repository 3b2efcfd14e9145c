//! Operator semantics.
//!
//! Numbers are `f64` throughout. `+` also concatenates when the left operand
//! is a string; every other arithmetic or ordering operator requires two
//! numbers. Equality never fails.

use star_ir::BinaryOp;
use star_value::{invalid_add, negate_requires_number, numbers_required, EvalResult, Value};

/// Apply `op` to two operands.
#[allow(clippy::needless_pass_by_value)]
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => add(&left, &right),
        BinaryOp::Eq => Ok(Value::Boolean(left == right)),
        BinaryOp::NotEq => Ok(Value::Boolean(left != right)),
        _ => match (&left, &right) {
            (Value::Number(a), Value::Number(b)) => Ok(eval_number_binary(*a, *b, op)),
            _ => Err(numbers_required(op)),
        },
    }
}

fn add(left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::String(a), b) => Ok(Value::from(format!("{a}{b}"))),
        _ => Err(invalid_add()),
    }
}

fn eval_number_binary(a: f64, b: f64, op: BinaryOp) -> Value {
    match op {
        BinaryOp::Add => Value::Number(a + b),
        BinaryOp::Sub => Value::Number(a - b),
        BinaryOp::Mul => Value::Number(a * b),
        BinaryOp::Div => Value::Number(a / b),
        BinaryOp::Mod => Value::Number(a % b),
        BinaryOp::Pow => Value::Number(a.powf(b)),
        BinaryOp::Shl => Value::from(to_i32(a).wrapping_shl(shift_amount(b))),
        BinaryOp::Shr => Value::from(to_i32(a).wrapping_shr(shift_amount(b))),
        #[allow(clippy::float_cmp)]
        BinaryOp::Eq => Value::Boolean(a == b),
        #[allow(clippy::float_cmp)]
        BinaryOp::NotEq => Value::Boolean(a != b),
        BinaryOp::Gt => Value::Boolean(a > b),
        BinaryOp::GtEq => Value::Boolean(a >= b),
        BinaryOp::Lt => Value::Boolean(a < b),
        BinaryOp::LtEq => Value::Boolean(a <= b),
    }
}

/// Truncate toward zero and saturate into `i32`; `NaN` becomes 0.
#[allow(clippy::cast_possible_truncation)]
fn to_i32(n: f64) -> i32 {
    n.trunc() as i32
}

/// Shift counts use the low five bits, like a 32-bit machine shift.
#[allow(clippy::cast_sign_loss)]
fn shift_amount(n: f64) -> u32 {
    (to_i32(n) & 31) as u32
}

pub fn evaluate_negate(value: &Value) -> EvalResult {
    match value {
        Value::Number(n) => Ok(Value::Number(-n)),
        _ => Err(negate_requires_number()),
    }
}
