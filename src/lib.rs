//! `hirc`: a SimpleC to HIR compiler
//!
//! HIR is a textual three-address code. The crate is split the usual way:
//! `frontend` turns source text into an AST, `backend` turns the AST into
//! HIR and `pipeline` strings the stages together.

pub mod backend;
pub mod common;
pub mod frontend;
pub mod pipeline;

pub use pipeline::{CompileError, compile};
