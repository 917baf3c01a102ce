//! Tests for AST to HIR lowering

mod expr_tests;

use crate::backend::hir::CodeBuffer;
use crate::common::ast::{BinOp, Block, Call, Expr, Ident, Stmt, UnaryOp, VarDecl, Type};
use crate::common::span::{Spanned, span};

/// Helper to create a spanned value with a dummy span
pub(super) fn spanned<T>(value: T) -> Spanned<T> {
    (value, span(0, 0))
}

pub(super) fn ident(name: &str) -> Ident<'_> {
    Ident::new(name, span(0, 0))
}

pub(super) fn int(value: i64) -> Spanned<Expr<'static>> {
    spanned(Expr::Int(value))
}

pub(super) fn var(name: &str) -> Spanned<Expr<'_>> {
    spanned(Expr::Var(ident(name)))
}

pub(super) fn string(lexeme: &str) -> Spanned<Expr<'_>> {
    spanned(Expr::Str(lexeme))
}

pub(super) fn bin<'src>(
    op: BinOp,
    lhs: Spanned<Expr<'src>>,
    rhs: Spanned<Expr<'src>>,
) -> Spanned<Expr<'src>> {
    spanned(Expr::binary(op, lhs, rhs))
}

pub(super) fn unary<'src>(op: UnaryOp, operand: Spanned<Expr<'src>>) -> Spanned<Expr<'src>> {
    spanned(Expr::unary(op, operand))
}

pub(super) fn call<'src>(name: &'src str, args: Vec<Spanned<Expr<'src>>>) -> Call<'src> {
    Call {
        callee: ident(name),
        args,
    }
}

pub(super) fn assign<'src>(name: &'src str, rhs: Spanned<Expr<'src>>) -> Spanned<Stmt<'src>> {
    spanned(Stmt::Assign { lhs: var(name), rhs })
}

pub(super) fn int_decl(name: &str) -> VarDecl<'_> {
    VarDecl {
        ty: Type::int(),
        name: ident(name),
    }
}

pub(super) fn block<'src>(decls: Vec<VarDecl<'src>>, stmts: Vec<Spanned<Stmt<'src>>>) -> Block<'src> {
    Block { decls, stmts }
}

pub(super) fn lines(code: &CodeBuffer) -> Vec<&str> {
    code.lines().iter().map(String::as_str).collect()
}
