//! SimpleC Compiler Pipeline
//!
//! # Pipeline Stages
//!
//! ```text
//! Source Code (&str)
//!     │
//!     ▼ lexer
//! Tokens (Vec<Spanned<Token>>)
//!     │
//!     ▼ parser
//! AST (Program)
//!     │
//!     ▼ name check
//! AST (Program), known to be well-formed
//!     │
//!     ▼ lower
//! HIR (CodeBuffer)
//!     │
//!     ▼ render
//! Output (String)
//! ```

use crate::backend::{CodegenError, lower_program};
use crate::common::ast::Program;
use crate::frontend::check::{CheckError, check_program};
use crate::frontend::lexer::lexer;
use crate::frontend::parser::program_parser;
use crate::frontend::report::render_syntax_error;
use chumsky::prelude::*;
use log::info;
use thiserror::Error;

/// Compilation error types
#[derive(Debug, Error)]
pub enum CompileError {
    /// Lexer errors (tokenization failed)
    #[error("lexer error:\n{}", .0.join("\n"))]
    Lex(Vec<String>),

    /// Parser errors (syntax errors)
    #[error("parse error:\n{}", .0.join("\n"))]
    Parse(Vec<String>),

    /// Naming errors
    #[error("{}", display_check_errors(.0))]
    Check(Vec<CheckError>),

    #[error("code generation failed: {0}")]
    Codegen(#[from] CodegenError),
}

fn display_check_errors(errors: &[CheckError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// A syntax tree together with the diagnostics recorded while building it.
///
/// With error recovery the parser can return a tree even though the source
/// is malformed; `errors` is empty only for a clean parse.
#[derive(Debug)]
pub struct Parsed<'src> {
    pub program: Program<'src>,
    pub errors: Vec<String>,
}

impl Parsed<'_> {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Lex and parse `source`
///
/// Fails only when no tree could be built at all.
pub fn parse(source: &str) -> Result<Parsed<'_>, CompileError> {
    // Stage 1: Lexical analysis
    info!("lexing {} bytes", source.len());
    let (tokens, lex_errors) = lexer().parse(source).into_output_errors();
    let mut errors: Vec<String> = lex_errors
        .iter()
        .map(|e| render_syntax_error(source, e))
        .collect();

    let Some(tokens) = tokens else {
        return Err(CompileError::Lex(errors));
    };

    // Stage 2: Parsing
    info!("parsing {} tokens", tokens.len());
    let eoi = (source.len()..source.len()).into();
    let (program, parse_errors) = program_parser()
        .parse(tokens.as_slice().map(eoi, |(t, s)| (t, s)))
        .into_output_errors();
    errors.extend(parse_errors.iter().map(|e| render_syntax_error(source, e)));

    match program {
        Some(program) => Ok(Parsed { program, errors }),
        None => Err(CompileError::Parse(errors)),
    }
}

/// Compile source code to HIR text
///
/// This is the main entry point for the compiler pipeline. Any diagnostic,
/// even one the parser recovered from, stops compilation.
///
/// # Example
///
/// ```
/// use hirc::compile;
///
/// let hir = compile("int x; int main() { x = 1; }").unwrap();
/// assert!(hir.contains("move $0_x, 1"));
/// ```
pub fn compile(source: &str) -> Result<String, CompileError> {
    let parsed = parse(source)?;
    if !parsed.is_clean() {
        return Err(CompileError::Parse(parsed.errors));
    }

    // Stage 3: Name checking
    info!("checking names");
    let check_errors = check_program(&parsed.program);
    if !check_errors.is_empty() {
        return Err(CompileError::Check(check_errors));
    }

    // Stage 4: Lower to HIR
    info!("generating HIR");
    let code = lower_program(&parsed.program)?;

    // Stage 5: Render
    Ok(code.to_string())
}
