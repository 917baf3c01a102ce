use super::expr::call_parser;
use super::types::var_decl_parser;
use crate::common::ast::{Block, Expr, Stmt, Token};
use crate::common::span::{Span, Spanned};
use chumsky::{input::ValueInput, prelude::*};

// Block parser: { declarations statements }
//
// Used for function bodies and for the bodies of every compound statement.
pub fn block_parser<'tokens, 'src: 'tokens, I>(
    expr: impl Parser<'tokens, I, Spanned<Expr<'src>>, extra::Err<Rich<'tokens, Token<'src>, Span>>>
    + Clone
    + 'tokens,
) -> impl Parser<'tokens, I, Block<'src>, extra::Err<Rich<'tokens, Token<'src>, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Token<'src>, Span = Span>,
{
    recursive(|block| {
        let stmt = stmt_parser(expr.clone(), block);

        var_decl_parser()
            .repeated()
            .collect::<Vec<_>>()
            .then(stmt.repeated().collect::<Vec<_>>())
            .delimited_by(just(Token::Ctrl('{')), just(Token::Ctrl('}')))
            .map(|(decls, stmts)| Block { decls, stmts })
            .recover_with(via_parser(nested_delimiters(
                Token::Ctrl('{'),
                Token::Ctrl('}'),
                [
                    (Token::Ctrl('('), Token::Ctrl(')')),
                    (Token::Ctrl('['), Token::Ctrl(']')),
                ],
                |_| Block::default(),
            )))
    })
    .boxed()
}

// Statement parser
pub fn stmt_parser<'tokens, 'src: 'tokens, I>(
    expr: impl Parser<'tokens, I, Spanned<Expr<'src>>, extra::Err<Rich<'tokens, Token<'src>, Span>>>
    + Clone
    + 'tokens,
    block: impl Parser<'tokens, I, Block<'src>, extra::Err<Rich<'tokens, Token<'src>, Span>>>
    + Clone
    + 'tokens,
) -> impl Parser<'tokens, I, Spanned<Stmt<'src>>, extra::Err<Rich<'tokens, Token<'src>, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Token<'src>, Span = Span>,
{
    let cond = expr
        .clone()
        .delimited_by(just(Token::Ctrl('(')), just(Token::Ctrl(')')));

    // Assignment without the terminator; `for` headers use it too
    let assign = expr
        .clone()
        .then_ignore(just(Token::Op("=")))
        .then(expr.clone())
        .map_with(|(lhs, rhs), e| (Stmt::Assign { lhs, rhs }, e.span()));

    let assign_stmt = assign.clone().then_ignore(just(Token::Ctrl(';')));

    // If statement, with or without else
    let if_stmt = just(Token::If)
        .ignore_then(cond.clone())
        .then(block.clone())
        .then(just(Token::Else).ignore_then(block.clone()).or_not())
        .map_with(|((cond, then_block), else_block), e| {
            let stmt = match else_block {
                Some(else_block) => Stmt::IfElse {
                    cond,
                    then_block,
                    else_block,
                },
                None => Stmt::If { cond, then_block },
            };
            (stmt, e.span())
        });

    // While loop
    let while_stmt = just(Token::While)
        .ignore_then(cond)
        .then(block.clone())
        .map_with(|(cond, body), e| (Stmt::While { cond, body }, e.span()));

    // For loop: for (init; cond; step) body
    let for_stmt = just(Token::For)
        .ignore_then(
            assign
                .clone()
                .then_ignore(just(Token::Ctrl(';')))
                .then(expr.clone())
                .then_ignore(just(Token::Ctrl(';')))
                .then(assign)
                .delimited_by(just(Token::Ctrl('(')), just(Token::Ctrl(')'))),
        )
        .then(block)
        .map_with(|(((init, cond), step), body), e| {
            (
                Stmt::For {
                    init: Box::new(init),
                    cond,
                    step: Box::new(step),
                    body,
                },
                e.span(),
            )
        });

    // Call statement: f(args);
    let call_stmt = call_parser(expr.clone())
        .then_ignore(just(Token::Ctrl(';')))
        .map_with(|call, e| (Stmt::Call(call), e.span()));

    // Return statement
    let return_stmt = just(Token::Return)
        .ignore_then(expr.or_not())
        .then_ignore(just(Token::Ctrl(';')))
        .map_with(|value, e| (Stmt::Return(value), e.span()));

    choice((
        if_stmt,
        while_stmt,
        for_stmt,
        return_stmt,
        call_stmt,
        assign_stmt,
    ))
    .labelled("statement")
    .boxed()
}
