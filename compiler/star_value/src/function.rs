//! Argument helpers for host functions.

use std::fmt;

use crate::engine::Engine;
use crate::errors::{argument_count, argument_type, EvalResult};
use crate::value::Value;

/// Accepted argument counts for a host function.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Constraint {
    /// Any number of arguments.
    #[default]
    None,
    Exactly(u8),
    AtLeast(u8),
    AtMost(u8),
    /// Inclusive range.
    Within(u8, u8),
}

impl Constraint {
    pub const fn test(self, argc: u8) -> bool {
        match self {
            Self::None => true,
            Self::Exactly(n) => argc == n,
            Self::AtLeast(n) => argc >= n,
            Self::AtMost(n) => argc <= n,
            Self::Within(min, max) => argc >= min && argc <= max,
        }
    }
}

fn plural(n: u8) -> &'static str {
    if n == 1 {
        "argument"
    } else {
        "arguments"
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::None => f.write_str("any number of arguments"),
            Self::Exactly(n) => write!(f, "{n} {}", plural(n)),
            Self::AtLeast(n) => write!(f, "at least {n} {}", plural(n)),
            Self::AtMost(n) => write!(f, "at most {n} {}", plural(n)),
            Self::Within(min, max) => write!(f, "{min}-{max} arguments"),
        }
    }
}

/// Expected kind of a positional argument.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArgType {
    Boolean,
    String,
    Number,
}

impl ArgType {
    pub const fn friendly_name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean (true/false)",
            Self::String => "string",
            Self::Number => "number",
        }
    }
}

/// Typed view over a host-function call.
///
/// Arguments come off the stack last-first, so `next_*` helpers take the
/// 1-based position of the argument being popped for error messages.
///
/// ```ignore
/// ns.set_contextual("pad", Constraint::Exactly(2), |ctx| {
///     let width = ctx.next_number(2)?;
///     let text = ctx.next_string(1)?;
///     Ok(format!("{text:>width$}", width = width as usize).into())
/// });
/// ```
pub struct FunctionContext<'a> {
    name: &'a str,
    engine: &'a mut dyn Engine,
    arg_count: u8,
}

impl<'a> FunctionContext<'a> {
    pub fn new(name: &'a str, engine: &'a mut dyn Engine, arg_count: u8) -> Self {
        FunctionContext {
            name,
            engine,
            arg_count,
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn arg_count(&self) -> u8 {
        self.arg_count
    }

    pub fn engine(&mut self) -> &mut dyn Engine {
        &mut *self.engine
    }

    /// Check the argument count against `constraint`.
    pub fn constrain(&self, constraint: Constraint) -> EvalResult<()> {
        if constraint.test(self.arg_count) {
            Ok(())
        } else {
            Err(argument_count(
                self.name,
                constraint.to_string(),
                self.arg_count,
            ))
        }
    }

    pub fn pop_arg(&mut self) -> EvalResult {
        self.engine.pop()
    }

    pub fn next_boolean(&mut self, position: u8) -> EvalResult<bool> {
        match self.engine.pop()? {
            Value::Boolean(b) => Ok(b),
            _ => Err(argument_type(self.name, position, ArgType::Boolean)),
        }
    }

    pub fn next_number(&mut self, position: u8) -> EvalResult<f64> {
        match self.engine.pop()? {
            Value::Number(n) => Ok(n),
            _ => Err(argument_type(self.name, position, ArgType::Number)),
        }
    }

    pub fn next_string(&mut self, position: u8) -> EvalResult<std::sync::Arc<str>> {
        match self.engine.pop()? {
            Value::String(s) => Ok(s),
            _ => Err(argument_type(self.name, position, ArgType::String)),
        }
    }

    /// Pop every argument, returned in call order.
    pub fn args(&mut self) -> EvalResult<Vec<Value>> {
        let mut args = Vec::with_capacity(usize::from(self.arg_count));
        for _ in 0..self.arg_count {
            args.push(self.engine.pop()?);
        }
        args.reverse();
        Ok(args)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
