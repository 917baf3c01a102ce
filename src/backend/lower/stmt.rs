//! Statement lowering from AST to HIR
//!
//! Every statement is lowered against a `next` label: the point control
//! reaches when the statement completes normally. The statement itself
//! never emits `next`; whoever supplied it places it.

use crate::backend::hir::{CodeBuffer, Instr, Label, StorageKind};
use crate::backend::lower::context::LoweringContext;
use crate::backend::lower::error::CodegenError;
use crate::backend::lower::expr::{BranchTargets, CallUsage, Value, lower_call, lower_cond, lower_expr};
use crate::common::ast::{Block, Expr, Stmt};
use crate::common::span::Spanned;

/// Lower a statement to HIR
pub fn lower_stmt<'src>(
    ctx: &mut LoweringContext,
    stmt: &Spanned<Stmt<'src>>,
    next: Label,
) -> Result<CodeBuffer, CodegenError> {
    match &stmt.0 {
        Stmt::Assign { lhs, rhs } => lower_assign(ctx, lhs, rhs),

        Stmt::If { cond, then_block } => lower_if(ctx, cond, then_block, next),

        Stmt::IfElse {
            cond,
            then_block,
            else_block,
        } => lower_if_else(ctx, cond, then_block, else_block, next),

        Stmt::While { cond, body } => lower_while(ctx, cond, body, next),

        Stmt::For {
            init,
            cond,
            step,
            body,
        } => lower_for(ctx, init, cond, step, body, next),

        Stmt::Call(call) => Ok(lower_call(ctx, call, CallUsage::Statement)?.0),

        Stmt::Return(value) => lower_return(ctx, value.as_ref()),
    }
}

/// Lower a sequence of statements in the current scope.
///
/// Each statement but the last gets a fresh label as its `next`, emitted
/// right after its code whether or not anything jumps there. The last one
/// continues at the caller's `next`.
pub fn lower_stmts<'src>(
    ctx: &mut LoweringContext,
    stmts: &[Spanned<Stmt<'src>>],
    next: Label,
) -> Result<CodeBuffer, CodegenError> {
    let mut code = CodeBuffer::new();
    let Some((last, leading)) = stmts.split_last() else {
        return Ok(code);
    };

    for stmt in leading {
        let label = ctx.new_label();
        code.append(lower_stmt(ctx, stmt, label)?);
        code.push_label(label);
    }
    code.append(lower_stmt(ctx, last, next)?);
    Ok(code)
}

/// Lower the body of an `if`/`else`/`while`/`for` in its own nested scope
pub fn lower_block<'src>(
    ctx: &mut LoweringContext,
    block: &Block<'src>,
    next: Label,
) -> Result<CodeBuffer, CodegenError> {
    ctx.scoped(|ctx| -> Result<CodeBuffer, CodegenError> {
        for decl in &block.decls {
            ctx.declare(&decl.name, StorageKind::Local)?;
        }
        lower_stmts(ctx, &block.stmts, next)
    })
}

fn lower_assign<'src>(
    ctx: &mut LoweringContext,
    lhs: &Spanned<Expr<'src>>,
    rhs: &Spanned<Expr<'src>>,
) -> Result<CodeBuffer, CodegenError> {
    let Value {
        mut code,
        addr: src,
    } = lower_expr(ctx, rhs)?;
    let Value {
        code: target_code,
        addr: dst,
    } = lower_expr(ctx, lhs)?;
    code.append(target_code);
    code.push(Instr::Move { dst, src });
    Ok(code)
}

/// ```text
///     <cond: true -> T, false -> next>
/// T:
///     <then>
/// ```
fn lower_if<'src>(
    ctx: &mut LoweringContext,
    cond: &Spanned<Expr<'src>>,
    then_block: &Block<'src>,
    next: Label,
) -> Result<CodeBuffer, CodegenError> {
    let on_true = ctx.new_label();
    let mut code = lower_cond(ctx, cond, BranchTargets::new(on_true, next))?;
    let then_code = lower_block(ctx, then_block, next)?;

    code.push_label(on_true);
    code.append(then_code);
    Ok(code)
}

/// ```text
///     <cond: true -> T, false -> F>
/// T:
///     <then>
///     jump next
/// F:
///     <else>
/// ```
fn lower_if_else<'src>(
    ctx: &mut LoweringContext,
    cond: &Spanned<Expr<'src>>,
    then_block: &Block<'src>,
    else_block: &Block<'src>,
    next: Label,
) -> Result<CodeBuffer, CodegenError> {
    let on_true = ctx.new_label();
    let on_false = ctx.new_label();
    let mut code = lower_cond(ctx, cond, BranchTargets::new(on_true, on_false))?;
    let then_code = lower_block(ctx, then_block, next)?;
    let else_code = lower_block(ctx, else_block, next)?;

    code.push_label(on_true);
    code.append(then_code);
    code.push(Instr::Jump { target: next });
    code.push_label(on_false);
    code.append(else_code);
    Ok(code)
}

/// ```text
/// E:
///     <cond: true -> T, false -> next>
/// T:
///     <body>
///     jump E
/// ```
fn lower_while<'src>(
    ctx: &mut LoweringContext,
    cond: &Spanned<Expr<'src>>,
    body: &Block<'src>,
    next: Label,
) -> Result<CodeBuffer, CodegenError> {
    let entry = ctx.new_label();
    let on_true = ctx.new_label();
    let cond_code = lower_cond(ctx, cond, BranchTargets::new(on_true, next))?;
    // Falling off the body and jumping back to the entry are the same thing
    let body_code = lower_block(ctx, body, entry)?;

    let mut code = CodeBuffer::new();
    code.push_label(entry);
    code.append(cond_code);
    code.push_label(on_true);
    code.append(body_code);
    code.push(Instr::Jump { target: entry });
    Ok(code)
}

/// ```text
///     <init>
/// E:
///     <cond: true -> T, false -> next>
/// T:
///     <body>
/// S:
///     <step>
///     jump E
/// ```
fn lower_for<'src>(
    ctx: &mut LoweringContext,
    init: &Spanned<Stmt<'src>>,
    cond: &Spanned<Expr<'src>>,
    step: &Spanned<Stmt<'src>>,
    body: &Block<'src>,
    next: Label,
) -> Result<CodeBuffer, CodegenError> {
    let entry = ctx.new_label();
    let init_code = lower_stmt(ctx, init, entry)?;

    let on_true = ctx.new_label();
    let cond_code = lower_cond(ctx, cond, BranchTargets::new(on_true, next))?;

    // Statements in the body that finish early must still run the step
    let step_entry = ctx.new_label();
    let body_code = lower_block(ctx, body, step_entry)?;
    let step_code = lower_stmt(ctx, step, entry)?;

    let mut code = init_code;
    code.push_label(entry);
    code.append(cond_code);
    code.push_label(on_true);
    code.append(body_code);
    code.push_label(step_entry);
    code.append(step_code);
    code.push(Instr::Jump { target: entry });
    Ok(code)
}

fn lower_return<'src>(
    ctx: &mut LoweringContext,
    value: Option<&Spanned<Expr<'src>>>,
) -> Result<CodeBuffer, CodegenError> {
    let func = ctx.current_function().to_string();
    match value {
        None => Ok(CodeBuffer::from(Instr::Ret { func })),
        Some(expr) => {
            let Value { mut code, addr } = lower_expr(ctx, expr)?;
            code.push(Instr::RetValue { func, value: addr });
            Ok(code)
        }
    }
}
