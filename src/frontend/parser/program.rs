use super::expr::{expr_parser, ident_parser};
use super::stmt::block_parser;
use super::types::{array_suffix, type_parser};
use crate::common::ast::{Decl, Function, Program, Prototype, Token, VarDecl};
use crate::common::span::{Span, Spanned};
use chumsky::{input::ValueInput, prelude::*};

// Top-level declaration: global variable, function definition or prototype
pub fn decl_parser<'tokens, 'src: 'tokens, I>()
-> impl Parser<'tokens, I, Spanned<Decl<'src>>, extra::Err<Rich<'tokens, Token<'src>, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Token<'src>, Span = Span>,
{
    let block = block_parser(expr_parser());
    let head = type_parser().then(ident_parser());

    // Parse a single parameter: type name
    let parameter = type_parser()
        .then(ident_parser())
        .map(|(ty, name)| VarDecl { ty, name });

    // Parse parameter list: (), (void) or (type name, ...)
    let parameters = choice((
        parameter
            .separated_by(just(Token::Ctrl(',')))
            .at_least(1)
            .collect::<Vec<_>>(),
        just(Token::Void).to(Vec::new()),
    ))
    .or_not()
    .map(Option::unwrap_or_default)
    .delimited_by(just(Token::Ctrl('(')), just(Token::Ctrl(')')));

    let function = head
        .clone()
        .then(parameters)
        .then(block.map(Some).or(just(Token::Ctrl(';')).to(None)))
        .map(|(((return_type, name), params), body)| match body {
            Some(body) => Decl::Function(Function {
                return_type,
                name,
                params,
                body,
            }),
            None => Decl::Prototype(Prototype {
                return_type,
                name,
                params,
            }),
        })
        .labelled("function");

    let global = head
        .then(array_suffix())
        .then_ignore(just(Token::Ctrl(';')))
        .map(|((mut ty, name), array_len)| {
            ty.array_len = array_len;
            Decl::Var(VarDecl { ty, name })
        });

    function
        .or(global)
        .map_with(|decl, e| (decl, e.span()))
        .boxed()
}

// Program parser
pub fn program_parser<'tokens, 'src: 'tokens, I>()
-> impl Parser<'tokens, I, Program<'src>, extra::Err<Rich<'tokens, Token<'src>, Span>>>
where
    I: ValueInput<'tokens, Token = Token<'src>, Span = Span>,
{
    decl_parser()
        .recover_with(skip_then_retry_until(any().ignored(), end()))
        .repeated()
        .collect::<Vec<_>>()
        .map(|decls| Program { decls })
        .then_ignore(end())
        .boxed()
}
