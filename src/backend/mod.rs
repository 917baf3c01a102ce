//! HIR Compiler Backend
//!
//! This module translates the AST handed over by the frontend into HIR, a
//! textual three-address code.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌─────────────────┐     ┌─────────────────┐
//! │      AST        │────▶│  HIR Lowering   │────▶│   CodeBuffer    │
//! │   (Program)     │     │ (scopes, labels)│     │   (HIR text)    │
//! └─────────────────┘     └─────────────────┘     └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - `hir`: addresses, instructions and the instruction buffer
//! - `lower`: AST to HIR lowering

pub mod hir;
pub mod lower;

pub use hir::{Address, CodeBuffer, Instr, Label, StorageKind};
pub use lower::{CodegenError, LoweringContext, lower_program};
