use crate::common::ast::Token;
use crate::common::span::{Span, Spanned};
use chumsky::prelude::*;

// Lexer
pub fn lexer<'src>()
-> impl Parser<'src, &'src str, Vec<Spanned<Token<'src>>>, extra::Err<Rich<'src, char, Span>>> {
    // A parser for numbers; leading zeros are allowed
    let num = text::digits(10)
        .to_slice()
        .try_map(|digits: &str, span| {
            digits
                .parse::<i64>()
                .map(Token::Num)
                .map_err(|err| Rich::custom(span, format!("invalid integer literal: {err}")))
        });

    // String literals keep their quotes and escapes verbatim
    let escape = just('\\').then(any()).ignored();
    let string = just('"')
        .then(none_of("\\\"\n").ignored().or(escape).repeated())
        .then(just('"'))
        .to_slice()
        .map(Token::Str);

    // A parser for operators
    let op = choice((
        just("=="),
        just("!="),
        just("<="),
        just(">="),
        just("&&"),
        just("||"),
        just("<"),
        just(">"),
        just("+"),
        just("-"),
        just("*"),
        just("/"),
        just("%"),
        just("="),
        just("!"),
        just("&"),
    ))
    .map(Token::Op);

    // A parser for control characters
    let ctrl = one_of("(){}[];,").map(Token::Ctrl);

    // A parser for identifiers and keywords
    let ident = any()
        .filter(|c: &char| c.is_ascii_alphabetic() || *c == '_')
        .then(
            any()
                .filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_')
                .repeated(),
        )
        .to_slice()
        .map(|ident: &str| match ident {
            "int" => Token::Int,
            "void" => Token::Void,
            "if" => Token::If,
            "else" => Token::Else,
            "while" => Token::While,
            "for" => Token::For,
            "return" => Token::Return,
            _ => Token::Ident(ident),
        });

    let token = num.or(string).or(op).or(ctrl).or(ident);

    let line_comment = just("//")
        .then(any().and_is(just('\n').not()).repeated())
        .ignored();
    let block_comment = just("/*")
        .then(any().and_is(just("*/").not()).repeated())
        .then(just("*/"))
        .ignored();
    let comment = line_comment.or(block_comment).padded();
    // Whitespace and comments between (and around) tokens
    let trivia = text::whitespace().then(comment.repeated()).ignored();

    let spanned_token = token
        .map_with(|tok, e| (tok, e.span()))
        .then_ignore(trivia.clone())
        // If we encounter an error, skip and attempt to lex the next character as a token instead
        .recover_with(skip_then_retry_until(any().ignored(), end()));

    trivia.ignore_then(spanned_token.repeated().collect::<Vec<_>>())
}
