use crate::common::span::Span;
use thiserror::Error;

/// Naming errors found before code generation.
///
/// Any of them makes the program unfit for HIR generation.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CheckError {
    #[error("cannot find variable `{name}` in this scope")]
    UndeclaredVariable { name: String, span: Span },

    #[error("`{name}` is declared more than once in the same scope")]
    DuplicateDeclaration {
        name: String,
        span: Span,
        previous: Span,
    },

    #[error("cannot find function `{name}`")]
    UndeclaredFunction { name: String, span: Span },
}

impl CheckError {
    pub fn span(&self) -> Span {
        match self {
            CheckError::UndeclaredVariable { span, .. } => *span,
            CheckError::DuplicateDeclaration { span, .. } => *span,
            CheckError::UndeclaredFunction { span, .. } => *span,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            CheckError::UndeclaredVariable { .. } => "E001",
            CheckError::DuplicateDeclaration { .. } => "E002",
            CheckError::UndeclaredFunction { .. } => "E003",
        }
    }
}
