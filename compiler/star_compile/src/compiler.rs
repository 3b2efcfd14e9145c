//! AST to bytecode.

use std::sync::Arc;

use star_ir::{BinaryOp, Expr, ExprArena, ExprId, ExprKind, ExprRange, LogicalOp, UnaryOp};
use star_parse::ParseResult;
use star_stack::ensure_sufficient_stack;
use star_value::Value;
use tracing::{debug, trace};

use crate::{CompileError, OpCode, Script, ScriptBuilder};

type CResult = Result<(), CompileError>;

/// Single-pass compiler over one arena.
pub struct Compiler<'a> {
    arena: &'a ExprArena,
    builder: ScriptBuilder,
    /// Number of enclosing `{...}` blocks. Strings at depth 0 are template text.
    block_depth: u32,
    /// Set by a block whose child can append its own result; taken by that
    /// child so nothing deeper sees it.
    append_next: bool,
}

impl<'a> Compiler<'a> {
    pub fn new(arena: &'a ExprArena) -> Self {
        Compiler {
            arena,
            builder: ScriptBuilder::new(),
            block_depth: 0,
            append_next: false,
        }
    }

    /// Compile `roots` in order and terminate with `End`.
    pub fn compile_roots(mut self, roots: &[ExprId]) -> Result<Script, CompileError> {
        for &root in roots {
            self.compile_expr(root)?;
        }
        self.builder.write_op(OpCode::End);
        debug!(
            code = self.builder.len(),
            constants = self.builder.constants().len(),
            "compiled script"
        );
        Ok(self.builder.into_script())
    }

    fn node(&self, id: ExprId) -> Result<&'a Expr, CompileError> {
        self.arena
            .try_get_expr(id)
            .ok_or(CompileError::DanglingExpr(id))
    }

    fn compile_expr(&mut self, id: ExprId) -> CResult {
        ensure_sufficient_stack(|| self.compile_expr_inner(id))
    }

    fn compile_expr_inner(&mut self, id: ExprId) -> CResult {
        let append = std::mem::take(&mut self.append_next);
        let expr = self.node(id)?;
        trace!(?id, kind = expr.kind.tag().name(), append, "compile");

        match &expr.kind {
            ExprKind::Null => self.builder.write_op(OpCode::Null),
            ExprKind::Boolean(true) => self.builder.write_op(OpCode::True),
            ExprKind::Boolean(false) => self.builder.write_op(OpCode::False),
            ExprKind::Number(n) => {
                self.builder
                    .write_op_constant(OpCode::Constant, Value::Number(*n))?;
            }
            ExprKind::String(s) => {
                let op = if self.block_depth == 0 || append {
                    OpCode::ConstantAppend
                } else {
                    OpCode::Constant
                };
                self.builder
                    .write_op_constant(op, Value::String(Arc::clone(s)))?;
            }
            ExprKind::Block(inner) => self.block(*inner)?,
            ExprKind::Group(inner) => self.compile_expr(*inner)?,
            ExprKind::Binary { left, op, right } => self.binary(*left, *op, *right)?,
            ExprKind::Unary { op, operand } => {
                self.compile_expr(*operand)?;
                self.builder.write_op(match op {
                    UnaryOp::Not => OpCode::Not,
                    UnaryOp::Neg => OpCode::Negate,
                });
            }
            ExprKind::Variable(name) => {
                let op = if append {
                    OpCode::VariableAppend
                } else {
                    OpCode::Variable
                };
                self.builder
                    .write_op_constant(op, Value::String(Arc::clone(name)))?;
            }
            ExprKind::Get { object, name } => self.get(*object, name, append)?,
            ExprKind::Call { callee, args } => self.call(*callee, *args, append)?,
            ExprKind::Logical { left, op, right } => self.logical(*left, *op, *right)?,
            ExprKind::Conditional {
                condition,
                then_expr,
                else_expr,
            } => self.conditional(*condition, *then_expr, *else_expr)?,
            ExprKind::Section { index, expr } => {
                let index = u8::try_from(*index)
                    .map_err(|_| CompileError::SectionIndexOutOfRange { index: *index })?;
                self.builder.write_op_byte(OpCode::Section, index);
                self.compile_expr(*expr)?;
            }
        }
        Ok(())
    }

    fn block(&mut self, inner: ExprId) -> CResult {
        self.block_depth += 1;
        let fused = matches!(
            self.node(inner)?.kind,
            ExprKind::String(_) | ExprKind::Variable(_) | ExprKind::Get { .. } | ExprKind::Call { .. }
        );
        self.append_next = fused;
        self.compile_expr(inner)?;
        if !fused {
            self.builder.write_op(OpCode::Append);
        }
        self.block_depth -= 1;
        Ok(())
    }

    fn binary(&mut self, left: ExprId, op: BinaryOp, right: ExprId) -> CResult {
        self.compile_expr(left)?;

        if op == BinaryOp::Add {
            let constant = match &self.node(right)?.kind {
                ExprKind::String(s) => Some(Value::String(Arc::clone(s))),
                ExprKind::Number(n) => Some(Value::Number(*n)),
                _ => None,
            };
            if let Some(constant) = constant {
                return self.builder.write_op_constant(OpCode::AddConstant, constant);
            }
        }

        self.compile_expr(right)?;
        self.builder.write_op(match op {
            BinaryOp::Add => OpCode::Add,
            BinaryOp::Sub => OpCode::Subtract,
            BinaryOp::Mul => OpCode::Multiply,
            BinaryOp::Div => OpCode::Divide,
            BinaryOp::Mod => OpCode::Modulo,
            BinaryOp::Pow => OpCode::Power,
            BinaryOp::Shl => OpCode::LeftShift,
            BinaryOp::Shr => OpCode::RightShift,
            BinaryOp::Eq => OpCode::Equals,
            BinaryOp::NotEq => OpCode::NotEquals,
            BinaryOp::Gt => OpCode::Greater,
            BinaryOp::GtEq => OpCode::GreaterEqual,
            BinaryOp::Lt => OpCode::Less,
            BinaryOp::LtEq => OpCode::LessEqual,
        });
        Ok(())
    }

    fn get(&mut self, object: ExprId, name: &Arc<str>, append: bool) -> CResult {
        let field = Value::String(Arc::clone(name));

        if let ExprKind::Variable(var) = &self.node(object)?.kind {
            let op = if append {
                OpCode::VariableGetAppend
            } else {
                OpCode::VariableGet
            };
            let var_index = self.builder.add_constant(Value::String(Arc::clone(var)))?;
            let field_index = self.builder.add_constant(field)?;
            self.builder.write_op_byte(op, var_index);
            self.builder.write_byte(field_index);
            return Ok(());
        }

        self.compile_expr(object)?;
        let op = if append {
            OpCode::GetAppend
        } else {
            OpCode::Get
        };
        self.builder.write_op_constant(op, field)
    }

    fn call(&mut self, callee: ExprId, args: ExprRange, append: bool) -> CResult {
        self.compile_expr(callee)?;

        let arena = self.arena;
        let args = arena.get_expr_list(args);
        let argc = u8::try_from(args.len())
            .map_err(|_| CompileError::TooManyArguments { count: args.len() })?;
        for &arg in args {
            self.compile_expr(arg)?;
        }

        let op = if append {
            OpCode::CallAppend
        } else {
            OpCode::Call
        };
        self.builder.write_op_byte(op, argc);
        Ok(())
    }

    fn logical(&mut self, left: ExprId, op: LogicalOp, right: ExprId) -> CResult {
        self.compile_expr(left)?;
        let end = self.builder.write_jump(match op {
            LogicalOp::And => OpCode::JumpIfFalse,
            LogicalOp::Or => OpCode::JumpIfTrue,
        });
        self.builder.write_op(OpCode::Pop);
        self.compile_expr(right)?;
        self.builder.patch_jump(end)
    }

    fn conditional(&mut self, condition: ExprId, then_expr: ExprId, else_expr: ExprId) -> CResult {
        self.compile_expr(condition)?;

        let false_jump = self.builder.write_jump(OpCode::JumpIfFalse);
        self.builder.write_op(OpCode::Pop);
        self.compile_expr(then_expr)?;

        let end_jump = self.builder.write_jump(OpCode::Jump);
        self.builder.patch_jump(false_jump)?;
        self.builder.write_op(OpCode::Pop);
        self.compile_expr(else_expr)?;

        self.builder.patch_jump(end_jump)
    }
}

/// Compile a parse result. Fails if the parse recorded any errors.
#[tracing::instrument(level = "debug", skip_all, fields(roots = result.exprs.len()))]
pub fn compile(result: &ParseResult) -> Result<Script, CompileError> {
    if result.has_errors() {
        return Err(CompileError::HasParseErrors {
            count: result.errors.len(),
        });
    }

    Compiler::new(&result.arena).compile_roots(&result.exprs)
}
