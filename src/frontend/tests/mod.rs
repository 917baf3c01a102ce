// Common test utilities
mod common;

mod lexer;
