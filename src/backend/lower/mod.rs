//! AST to HIR lowering
//!
//! This module implements the code generator: a single pass over the AST
//! that emits HIR text.
//!
//! # Modules
//!
//! - `context`: scopes and address/label allocation
//! - `expr`: expression lowering (value and condition modes)
//! - `stmt`: statement lowering
//! - `function`: declaration lowering
//! - `error`: failures of the generator
//!
//! # Usage
//!
//! ```
//! use hirc::backend::lower_program;
//! use hirc::common::ast::Program;
//!
//! let code = lower_program(&Program::default()).unwrap();
//! assert_eq!(code.to_string(), "\nentry main, 0\n");
//! ```

pub mod context;
pub mod error;
pub mod expr;
pub mod function;
pub mod stmt;

#[cfg(test)]
mod tests;

// Re-exports
pub use context::{LoweringContext, ScopeId};
pub use error::CodegenError;
pub use expr::{BranchTargets, CallUsage, Value, lower_call, lower_cond, lower_expr};
pub use function::{lower_decl, lower_function};
pub use stmt::{lower_block, lower_stmt, lower_stmts};

use crate::backend::hir::{CodeBuffer, Instr};
use crate::common::ast::Program;
use log::debug;

/// Lower a whole program to HIR
///
/// Output layout: the string pool, a blank line, the `entry` line with the
/// number of globals, then the code of every declaration in source order.
/// Each call starts from a fresh [`LoweringContext`].
pub fn lower_program<'src>(program: &Program<'src>) -> Result<CodeBuffer, CodegenError> {
    let mut ctx = LoweringContext::new();

    let mut decls = CodeBuffer::new();
    for decl in &program.decls {
        decls.append(lower_decl(&mut ctx, decl)?);
    }

    debug!(
        "lowered program: {} globals, {} strings, {} labels",
        ctx.global_count(),
        ctx.strings().len(),
        ctx.label_count()
    );

    let mut code = ctx.string_pool_code();
    code.push_blank();
    code.push(Instr::Entry {
        globals: ctx.global_count(),
    });
    code.append(decls);
    Ok(code)
}
