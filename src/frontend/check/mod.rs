//! Name analysis
//!
//! A single walk over the program that records every use of an undeclared
//! variable or function and every name declared twice in one scope. Unlike
//! the code generator it never stops at the first problem.

pub mod context;
pub mod error;
pub mod report;

pub use context::NameContext;
pub use error::CheckError;
pub use report::report_check_error;

use crate::common::ast::{Block, Call, Decl, Expr, Function, Ident, Program, Stmt, VarDecl};
use crate::common::span::Spanned;
use log::debug;

/// Check a whole program, returning every error found
pub fn check_program(program: &Program<'_>) -> Vec<CheckError> {
    let mut checker = Checker::default();
    let mut ctx = NameContext::new();

    for (decl, _) in &program.decls {
        ctx = match decl {
            Decl::Var(var) => checker.declare(&ctx, &var.name),
            Decl::Prototype(proto) => ctx.with_function(&proto.name),
            Decl::Function(func) => {
                // Visible inside its own body
                let ctx = ctx.with_function(&func.name);
                checker.check_function(&ctx, func);
                ctx
            }
        };
    }

    debug!("name check: {} error(s)", checker.errors.len());
    checker.errors
}

#[derive(Default)]
struct Checker {
    errors: Vec<CheckError>,
}

impl Checker {
    // Declare a variable, keeping the old context when the name clashes
    fn declare<'src>(&mut self, ctx: &NameContext<'src>, name: &Ident<'src>) -> NameContext<'src> {
        match ctx.with_variable(name) {
            Ok(new_ctx) => new_ctx,
            Err(previous) => {
                self.errors.push(CheckError::DuplicateDeclaration {
                    name: name.name.to_string(),
                    span: name.span,
                    previous,
                });
                ctx.clone()
            }
        }
    }

    fn declare_all<'src>(
        &mut self,
        ctx: NameContext<'src>,
        decls: &[VarDecl<'src>],
    ) -> NameContext<'src> {
        decls
            .iter()
            .fold(ctx, |ctx, decl| self.declare(&ctx, &decl.name))
    }

    // Parameters and top-level locals share one scope
    fn check_function<'src>(&mut self, ctx: &NameContext<'src>, func: &Function<'src>) {
        let body_ctx = self.declare_all(ctx.enter_scope(), &func.params);
        let body_ctx = self.declare_all(body_ctx, &func.body.decls);
        self.check_stmts(&body_ctx, &func.body.stmts);
    }

    fn check_block<'src>(&mut self, ctx: &NameContext<'src>, block: &Block<'src>) {
        let inner = self.declare_all(ctx.enter_scope(), &block.decls);
        self.check_stmts(&inner, &block.stmts);
    }

    fn check_stmts<'src>(&mut self, ctx: &NameContext<'src>, stmts: &[Spanned<Stmt<'src>>]) {
        for stmt in stmts {
            self.check_stmt(ctx, stmt);
        }
    }

    fn check_stmt<'src>(&mut self, ctx: &NameContext<'src>, stmt: &Spanned<Stmt<'src>>) {
        match &stmt.0 {
            Stmt::Assign { lhs, rhs } => {
                self.check_expr(ctx, rhs);
                self.check_expr(ctx, lhs);
            }
            Stmt::If { cond, then_block } => {
                self.check_expr(ctx, cond);
                self.check_block(ctx, then_block);
            }
            Stmt::IfElse {
                cond,
                then_block,
                else_block,
            } => {
                self.check_expr(ctx, cond);
                self.check_block(ctx, then_block);
                self.check_block(ctx, else_block);
            }
            Stmt::While { cond, body } => {
                self.check_expr(ctx, cond);
                self.check_block(ctx, body);
            }
            Stmt::For {
                init,
                cond,
                step,
                body,
            } => {
                self.check_stmt(ctx, init);
                self.check_expr(ctx, cond);
                self.check_stmt(ctx, step);
                self.check_block(ctx, body);
            }
            Stmt::Call(call) => self.check_call(ctx, call),
            Stmt::Return(value) => {
                if let Some(value) = value {
                    self.check_expr(ctx, value);
                }
            }
        }
    }

    fn check_expr<'src>(&mut self, ctx: &NameContext<'src>, expr: &Spanned<Expr<'src>>) {
        match &expr.0 {
            Expr::Error | Expr::Int(_) | Expr::Str(_) => {}
            Expr::Var(ident) => {
                if ctx.lookup_variable(ident.name).is_none() {
                    self.errors.push(CheckError::UndeclaredVariable {
                        name: ident.name.to_string(),
                        span: ident.span,
                    });
                }
            }
            Expr::Index { base, index } => {
                self.check_expr(ctx, base);
                self.check_expr(ctx, index);
            }
            Expr::Call(call) => self.check_call(ctx, call),
            Expr::Unary { operand, .. } => self.check_expr(ctx, operand),
            Expr::Binary { lhs, rhs, .. } => {
                self.check_expr(ctx, lhs);
                self.check_expr(ctx, rhs);
            }
        }
    }

    fn check_call<'src>(&mut self, ctx: &NameContext<'src>, call: &Call<'src>) {
        if !ctx.is_callable(call.callee.name) {
            self.errors.push(CheckError::UndeclaredFunction {
                name: call.callee.name.to_string(),
                span: call.callee.span,
            });
        }
        for arg in &call.args {
            self.check_expr(ctx, arg);
        }
    }
}
