//! Expression lowering from AST to HIR
//!
//! An expression is lowered in one of two modes:
//!
//! - value mode ([`lower_expr`]): the code computes the expression and the
//!   result names the address holding it;
//! - condition mode ([`lower_cond`]): the caller supplies a true and a false
//!   label and the code always ends by transferring control to one of them.
//!
//! `&&`, `||` and `!` only short-circuit in condition mode. In value mode
//! both operands of `&&`/`||` are always evaluated and combined with a
//! single `and`/`or`.

use crate::backend::hir::{Address, CodeBuffer, Instr, Label, Opcode};
use crate::backend::lower::context::LoweringContext;
use crate::backend::lower::error::CodegenError;
use crate::common::ast::{BinOp, Call, Expr, UnaryOp};
use crate::common::span::{Span, Spanned};

/// Code computing a value, and where the value ends up
#[derive(Clone, Debug, PartialEq)]
pub struct Value {
    pub code: CodeBuffer,
    pub addr: Address,
}

impl Value {
    /// A value that needs no code (constants, variables, pooled strings)
    fn bare(addr: Address) -> Self {
        Self {
            code: CodeBuffer::new(),
            addr,
        }
    }
}

/// Where control goes after a condition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BranchTargets {
    pub on_true: Label,
    pub on_false: Label,
}

impl BranchTargets {
    pub fn new(on_true: Label, on_false: Label) -> Self {
        Self { on_true, on_false }
    }

    pub fn swapped(self) -> Self {
        Self {
            on_true: self.on_false,
            on_false: self.on_true,
        }
    }
}

/// How the result of a call is used
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallUsage {
    /// Inside an expression: the result lands in a fresh temporary
    Value,
    /// As a statement: the result is discarded and `scanf`/`printf` become
    /// `read`/`write`
    Statement,
}

/// Lower an expression in value mode
pub fn lower_expr<'src>(
    ctx: &mut LoweringContext,
    expr: &Spanned<Expr<'src>>,
) -> Result<Value, CodegenError> {
    let span = expr.1;

    match &expr.0 {
        Expr::Int(value) => Ok(Value::bare(Address::Const(*value))),

        Expr::Str(text) => Ok(Value::bare(ctx.intern_string(text))),

        Expr::Var(ident) => Ok(Value::bare(ctx.lookup(ident.name))),

        Expr::Call(call) => lower_call_value(ctx, call),

        Expr::Unary { op, operand } => lower_unary(ctx, *op, operand, span),

        Expr::Binary { op, lhs, rhs } => lower_binary(ctx, *op, lhs, rhs),

        Expr::Index { .. } => Err(CodegenError::Unsupported {
            feature: "array indexing",
            span,
        }),

        Expr::Error => Err(CodegenError::Malformed { span }),
    }
}

/// Lower an expression in condition mode
///
/// The returned code never falls through: it ends in a jump to
/// `targets.on_true` or `targets.on_false` on every path.
pub fn lower_cond<'src>(
    ctx: &mut LoweringContext,
    expr: &Spanned<Expr<'src>>,
    targets: BranchTargets,
) -> Result<CodeBuffer, CodegenError> {
    match &expr.0 {
        // Negation is a swap of the targets; no value is computed
        Expr::Unary {
            op: UnaryOp::Not,
            operand,
        } => lower_cond(ctx, operand, targets.swapped()),

        // The right operand is reached only through `rhs_entry`, i.e. once
        // the left operand held
        Expr::Binary {
            op: BinOp::And,
            lhs,
            rhs,
        } => {
            let rhs_entry = ctx.new_label();
            let mut code = lower_cond(ctx, lhs, BranchTargets::new(rhs_entry, targets.on_false))?;
            let rhs_code = lower_cond(ctx, rhs, targets)?;
            code.push_label(rhs_entry);
            code.append(rhs_code);
            Ok(code)
        }

        // Symmetric: the right operand runs only once the left one failed
        Expr::Binary {
            op: BinOp::Or,
            lhs,
            rhs,
        } => {
            let rhs_entry = ctx.new_label();
            let mut code = lower_cond(ctx, lhs, BranchTargets::new(targets.on_true, rhs_entry))?;
            let rhs_code = lower_cond(ctx, rhs, targets)?;
            code.push_label(rhs_entry);
            code.append(rhs_code);
            Ok(code)
        }

        // Comparisons and every other expression: compute the value, then
        // test it
        _ => {
            let Value { mut code, addr } = lower_expr(ctx, expr)?;
            code.push(Instr::JumpIfTrue {
                cond: addr,
                target: targets.on_true,
            });
            code.push(Instr::Jump {
                target: targets.on_false,
            });
            Ok(code)
        }
    }
}

/// Lower a call. Returns the code and, for [`CallUsage::Value`], the
/// temporary receiving the result.
pub fn lower_call<'src>(
    ctx: &mut LoweringContext,
    call: &Call<'src>,
    usage: CallUsage,
) -> Result<(CodeBuffer, Option<Address>), CodegenError> {
    match usage {
        CallUsage::Value => {
            let Value { code, addr } = lower_call_value(ctx, call)?;
            Ok((code, Some(addr)))
        }
        CallUsage::Statement => Ok((lower_call_stmt(ctx, call)?, None)),
    }
}

fn lower_call_value<'src>(
    ctx: &mut LoweringContext,
    call: &Call<'src>,
) -> Result<Value, CodegenError> {
    let (mut code, args) = lower_args(ctx, &call.args)?;
    let argc = args.len();
    push_args(&mut code, args);

    let dst = ctx.new_temp();
    code.push(Instr::CallValue {
        dst: dst.clone(),
        name: call.callee.name.to_string(),
        argc,
    });
    Ok(Value { code, addr: dst })
}

fn lower_call_stmt<'src>(
    ctx: &mut LoweringContext,
    call: &Call<'src>,
) -> Result<CodeBuffer, CodegenError> {
    let (mut code, args) = lower_args(ctx, &call.args)?;

    match call.callee.name {
        "scanf" => {
            for dst in args {
                code.push(Instr::Read { dst });
            }
        }
        "printf" => {
            for src in args {
                code.push(Instr::Write { src });
            }
        }
        name => {
            let argc = args.len();
            push_args(&mut code, args);
            code.push(Instr::Call {
                name: name.to_string(),
                argc,
            });
        }
    }
    Ok(code)
}

/// Evaluate arguments left to right; all of their code precedes any
/// `arg`/`read`/`write` line
fn lower_args<'src>(
    ctx: &mut LoweringContext,
    args: &[Spanned<Expr<'src>>],
) -> Result<(CodeBuffer, Vec<Address>), CodegenError> {
    let mut code = CodeBuffer::new();
    let mut addrs = Vec::with_capacity(args.len());
    for arg in args {
        let Value { code: arg_code, addr } = lower_expr(ctx, arg)?;
        code.append(arg_code);
        addrs.push(addr);
    }
    Ok((code, addrs))
}

fn push_args(code: &mut CodeBuffer, args: Vec<Address>) {
    for (position, value) in args.into_iter().enumerate() {
        code.push(Instr::Arg { value, position });
    }
}

fn lower_unary<'src>(
    ctx: &mut LoweringContext,
    op: UnaryOp,
    operand: &Spanned<Expr<'src>>,
    span: Span,
) -> Result<Value, CodegenError> {
    match op {
        UnaryOp::Neg => {
            let Value { mut code, addr } = lower_expr(ctx, operand)?;
            let dst = ctx.new_temp();
            code.push(Instr::Binary {
                op: Opcode::Sub,
                dst: dst.clone(),
                lhs: Address::Const(0),
                rhs: addr,
            });
            Ok(Value { code, addr: dst })
        }
        UnaryOp::Not => {
            let Value { mut code, addr } = lower_expr(ctx, operand)?;
            let dst = ctx.new_temp();
            code.push(Instr::Not {
                dst: dst.clone(),
                src: addr,
            });
            Ok(Value { code, addr: dst })
        }
        UnaryOp::AddrOf => Err(CodegenError::Unsupported {
            feature: "address-of",
            span,
        }),
        UnaryOp::Deref => Err(CodegenError::Unsupported {
            feature: "pointer dereference",
            span,
        }),
    }
}

/// Both operands, left then right, then one opcode into a fresh temporary.
/// In value mode this holds for `&&` and `||` as well.
fn lower_binary<'src>(
    ctx: &mut LoweringContext,
    op: BinOp,
    lhs: &Spanned<Expr<'src>>,
    rhs: &Spanned<Expr<'src>>,
) -> Result<Value, CodegenError> {
    let Value {
        mut code,
        addr: lhs_addr,
    } = lower_expr(ctx, lhs)?;
    let Value {
        code: rhs_code,
        addr: rhs_addr,
    } = lower_expr(ctx, rhs)?;
    code.append(rhs_code);

    let dst = ctx.new_temp();
    code.push(Instr::Binary {
        op: Opcode::from(op),
        dst: dst.clone(),
        lhs: lhs_addr,
        rhs: rhs_addr,
    });
    Ok(Value { code, addr: dst })
}
