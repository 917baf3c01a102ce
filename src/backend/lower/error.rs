use crate::common::span::Span;
use thiserror::Error;

/// Conditions under which HIR generation gives up.
///
/// All of them point at a defect in the tree handed to the backend; the
/// generator never recovers from one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodegenError {
    #[error("`{name}` is already declared in this scope")]
    DuplicateDeclaration { name: String, span: Span },

    #[error("{feature} is not supported by the HIR generator")]
    Unsupported { feature: &'static str, span: Span },

    #[error("malformed expression left by an earlier error")]
    Malformed { span: Span },
}

impl CodegenError {
    pub fn span(&self) -> Span {
        match self {
            CodegenError::DuplicateDeclaration { span, .. } => *span,
            CodegenError::Unsupported { span, .. } => *span,
            CodegenError::Malformed { span } => *span,
        }
    }
}
