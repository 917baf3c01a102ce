//! HIR: the textual three-address target of the backend
//!
//! # Modules
//!
//! - `address`: operands, labels and index counters
//! - `instr`: the instruction set and its textual form
//! - `buffer`: the ordered instruction buffer

pub mod address;
pub mod buffer;
pub mod instr;


pub use address::{Address, Counter, Label, StorageKind};
pub use buffer::CodeBuffer;
pub use instr::{Instr, Opcode};
