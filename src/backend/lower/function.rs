//! Declaration lowering from AST to HIR
//!
//! Variable declarations only bind names. A function definition opens a
//! scope under the program scope, resets the per-function counters and
//! wraps its body in the `func`/`funci`/`efunc` frame.

use crate::backend::hir::{CodeBuffer, Instr, StorageKind};
use crate::backend::lower::context::LoweringContext;
use crate::backend::lower::error::CodegenError;
use crate::backend::lower::stmt::lower_stmts;
use crate::common::ast::{Decl, Function};
use crate::common::span::Spanned;
use log::debug;

/// Lower a top-level declaration
pub fn lower_decl<'src>(
    ctx: &mut LoweringContext,
    decl: &Spanned<Decl<'src>>,
) -> Result<CodeBuffer, CodegenError> {
    match &decl.0 {
        Decl::Var(var) => {
            ctx.declare(&var.name, StorageKind::Global)?;
            Ok(CodeBuffer::new())
        }
        Decl::Function(func) => lower_function(ctx, func),
        // Prototypes only matter to the checker
        Decl::Prototype(_) => Ok(CodeBuffer::new()),
    }
}

/// Lower a function definition
///
/// ```text
///
/// func <name>
/// funci <locals>, <temps>
///     <body>
///     <exit>:
/// efunc <name>
/// ```
pub fn lower_function<'src>(
    ctx: &mut LoweringContext,
    func: &Function<'src>,
) -> Result<CodeBuffer, CodegenError> {
    let name = func.name.name;

    let body = ctx.scoped(|ctx| -> Result<CodeBuffer, CodegenError> {
        ctx.enter_function(name);

        for param in &func.params {
            ctx.declare(&param.name, StorageKind::Param)?;
        }
        for decl in &func.body.decls {
            ctx.declare(&decl.name, StorageKind::Local)?;
        }

        let exit = ctx.new_label();
        let mut body = lower_stmts(ctx, &func.body.stmts, exit)?;
        body.push_label(exit);
        Ok(body)
    })?;

    debug!(
        "lowered function `{}`: {} params, {} locals, {} temps",
        name,
        ctx.param_count(),
        ctx.local_count(),
        ctx.temp_count()
    );

    let mut code = CodeBuffer::new();
    code.push_blank();
    code.push(Instr::Func {
        name: name.to_string(),
    });
    code.push(Instr::FuncInfo {
        locals: ctx.local_count(),
        temps: ctx.temp_count(),
    });
    code.append_indented(body);
    code.push(Instr::EndFunc {
        name: name.to_string(),
    });
    Ok(code)
}
