use crate::common::ast::{BaseType, Token, Type, VarDecl};
use crate::common::span::Span;
use super::expr::ident_parser;
use chumsky::{input::ValueInput, prelude::*};

// Type parser: a base type followed by any number of `*`
pub fn type_parser<'tokens, 'src: 'tokens, I>()
-> impl Parser<'tokens, I, Type, extra::Err<Rich<'tokens, Token<'src>, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Token<'src>, Span = Span>,
{
    select! {
        Token::Int => BaseType::Int,
        Token::Void => BaseType::Void,
    }
    .then(just(Token::Op("*")).repeated().collect::<Vec<_>>())
    .map(|(base, stars)| Type {
        base,
        pointers: stars.len(),
        array_len: None,
    })
    .labelled("type")
}

// Array suffix: [N]
pub fn array_suffix<'tokens, 'src: 'tokens, I>()
-> impl Parser<'tokens, I, Option<usize>, extra::Err<Rich<'tokens, Token<'src>, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Token<'src>, Span = Span>,
{
    select! { Token::Num(n) => n as usize }
        .delimited_by(just(Token::Ctrl('[')), just(Token::Ctrl(']')))
        .or_not()
}

// Variable declaration: type name [N]? ;
pub fn var_decl_parser<'tokens, 'src: 'tokens, I>()
-> impl Parser<'tokens, I, VarDecl<'src>, extra::Err<Rich<'tokens, Token<'src>, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Token<'src>, Span = Span>,
{
    type_parser()
        .then(ident_parser())
        .then(array_suffix())
        .then_ignore(just(Token::Ctrl(';')))
        .map(|((mut ty, name), array_len)| {
            ty.array_len = array_len;
            VarDecl { ty, name }
        })
        .labelled("declaration")
}
