//! SimpleC frontend: lexing, parsing and name analysis

pub mod check;
pub mod lexer;
pub mod parser;
pub mod report;

#[cfg(test)]
mod tests;

pub use check::{CheckError, check_program, report_check_error};
pub use report::render_syntax_error;
