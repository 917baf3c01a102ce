use crate::common::ast::{Program, Stmt, Token};
use crate::common::span::Spanned;
use crate::frontend::lexer::lexer;
use crate::frontend::parser::{program_parser, stmt_parser, block_parser, expr_parser};
use chumsky::prelude::*;

pub fn parse_tokens(src: &str) -> Vec<Spanned<Token<'_>>> {
    lexer().parse(src).into_result().unwrap()
}

pub fn parse_program(src: &str) -> Program<'_> {
    let tokens = parse_tokens(src);
    program_parser()
        .parse(
            tokens
                .as_slice()
                .map((src.len()..src.len()).into(), |(t, s)| (t, s)),
        )
        .into_result()
        .unwrap()
}

pub fn parse_stmt(src: &str) -> Stmt<'_> {
    let tokens = parse_tokens(src);
    stmt_parser(expr_parser(), block_parser(expr_parser()))
        .parse(
            tokens
                .as_slice()
                .map((src.len()..src.len()).into(), |(t, s)| (t, s)),
        )
        .into_result()
        .unwrap()
        .0
}

pub fn program_accepted(src: &str) -> bool {
    let tokens = parse_tokens(src);
    program_parser()
        .parse(
            tokens
                .as_slice()
                .map((src.len()..src.len()).into(), |(t, s)| (t, s)),
        )
        .into_result()
        .is_ok()
}
