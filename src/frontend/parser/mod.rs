pub mod expr;
pub mod program;
pub mod stmt;
pub mod types;

pub use expr::{call_parser, expr_parser, ident_parser};
pub use program::{decl_parser, program_parser};
pub use stmt::{block_parser, stmt_parser};
pub use types::{array_suffix, type_parser, var_decl_parser};
