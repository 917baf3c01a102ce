use super::common::parse_tokens;
use crate::common::ast::Token;
use crate::frontend::lexer::lexer;
use chumsky::prelude::*;

#[test]
fn test_lexer_declaration() {
    let tokens = parse_tokens("int x;");
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].0, Token::Int);
    assert_eq!(tokens[1].0, Token::Ident("x"));
    assert_eq!(tokens[2].0, Token::Ctrl(';'));
}

#[test]
fn test_lexer_keywords() {
    let tokens = parse_tokens("int void if else while for return");
    let kinds: Vec<_> = tokens.into_iter().map(|(t, _)| t).collect();
    assert_eq!(
        kinds,
        vec![
            Token::Int,
            Token::Void,
            Token::If,
            Token::Else,
            Token::While,
            Token::For,
            Token::Return,
        ]
    );
}

#[test]
fn test_lexer_keyword_prefix_is_identifier() {
    let tokens = parse_tokens("integer returned for_each");
    assert_eq!(tokens[0].0, Token::Ident("integer"));
    assert_eq!(tokens[1].0, Token::Ident("returned"));
    assert_eq!(tokens[2].0, Token::Ident("for_each"));
}

#[test]
fn test_lexer_all_comparison_operators() {
    let tokens = parse_tokens("< > <= >= == !=");
    assert_eq!(tokens[0].0, Token::Op("<"));
    assert_eq!(tokens[1].0, Token::Op(">"));
    assert_eq!(tokens[2].0, Token::Op("<="));
    assert_eq!(tokens[3].0, Token::Op(">="));
    assert_eq!(tokens[4].0, Token::Op("=="));
    assert_eq!(tokens[5].0, Token::Op("!="));
}

#[test]
fn test_lexer_arithmetic_operators() {
    let tokens = parse_tokens("+ - * / % = & !");
    assert_eq!(tokens[0].0, Token::Op("+"));
    assert_eq!(tokens[1].0, Token::Op("-"));
    assert_eq!(tokens[2].0, Token::Op("*"));
    assert_eq!(tokens[3].0, Token::Op("/"));
    assert_eq!(tokens[4].0, Token::Op("%"));
    assert_eq!(tokens[5].0, Token::Op("="));
    assert_eq!(tokens[6].0, Token::Op("&"));
    assert_eq!(tokens[7].0, Token::Op("!"));
}

#[test]
fn test_lexer_logical_operators() {
    let tokens = parse_tokens("a&&b||c");
    assert_eq!(tokens[1].0, Token::Op("&&"));
    assert_eq!(tokens[3].0, Token::Op("||"));
}

#[test]
fn test_lexer_control_characters() {
    let tokens = parse_tokens("( ) { } [ ] ; ,");
    let ctrls: Vec<_> = tokens.into_iter().map(|(t, _)| t).collect();
    assert_eq!(
        ctrls,
        "(){}[];,".chars().map(Token::Ctrl).collect::<Vec<_>>()
    );
}

#[test]
fn test_lexer_string_literal_keeps_quotes() {
    let tokens = parse_tokens(r#"printf("x = \"%d\"\n");"#);
    assert_eq!(tokens[2].0, Token::Str(r#""x = \"%d\"\n""#));
}

#[test]
fn test_lexer_spans() {
    let tokens = parse_tokens("int  count;");
    assert_eq!(tokens[1].1.start, 5);
    assert_eq!(tokens[1].1.end, 10);
}

#[test]
fn test_lexer_skips_comments() {
    let src = "// header\nint x; /* a\n block */ int y; // trailing";
    let tokens = parse_tokens(src);
    assert_eq!(tokens.len(), 6);
    assert_eq!(tokens[3].0, Token::Int);
    assert_eq!(tokens[4].0, Token::Ident("y"));
}

#[test]
fn test_lexer_division_is_not_a_comment() {
    let tokens = parse_tokens("a / b");
    assert_eq!(tokens[1].0, Token::Op("/"));
}

#[test]
fn test_lexer_empty_and_comment_only_input() {
    assert!(parse_tokens("").is_empty());
    assert!(parse_tokens("  /* nothing */ \n // here\n").is_empty());
    assert!(parse_tokens("// nothing\n").is_empty());
    assert!(parse_tokens("/* a */ // b").is_empty());
}

#[test]
fn test_lexer_comment_before_first_token() {
    let tokens = parse_tokens("/* header */\n// more\nint x;");
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].0, Token::Int);
    assert_eq!(tokens[0].1, SimpleSpan::from(21..24));
}

#[test]
fn test_lexer_leading_zeros() {
    let tokens = parse_tokens("007 0");
    let kinds: Vec<_> = tokens.into_iter().map(|(t, _)| t).collect();
    assert_eq!(kinds, vec![Token::Num(7), Token::Num(0)]);
}

#[test]
fn test_lexer_recovers_from_unknown_character() {
    let (tokens, errors) = lexer().parse("int @x;").into_output_errors();
    assert_eq!(errors.len(), 1);
    let tokens = tokens.unwrap();
    assert!(tokens.iter().any(|(t, _)| *t == Token::Ident("x")));
}
