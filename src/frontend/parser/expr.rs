use crate::common::ast::{BinOp, Call, Expr, Ident, Token, UnaryOp};
use crate::common::span::{Span, Spanned};
use chumsky::{input::ValueInput, prelude::*};

// Identifier with the span it was written at
pub fn ident_parser<'tokens, 'src: 'tokens, I>()
-> impl Parser<'tokens, I, Ident<'src>, extra::Err<Rich<'tokens, Token<'src>, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Token<'src>, Span = Span>,
{
    select! { Token::Ident(name) => name }
        .map_with(|name, e| Ident::new(name, e.span()))
        .labelled("identifier")
}

// Function call: name(args)
pub fn call_parser<'tokens, 'src: 'tokens, I>(
    expr: impl Parser<'tokens, I, Spanned<Expr<'src>>, extra::Err<Rich<'tokens, Token<'src>, Span>>>
    + Clone
    + 'tokens,
) -> impl Parser<'tokens, I, Call<'src>, extra::Err<Rich<'tokens, Token<'src>, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Token<'src>, Span = Span>,
{
    ident_parser()
        .then(
            expr.separated_by(just(Token::Ctrl(',')))
                .collect::<Vec<_>>()
                .delimited_by(just(Token::Ctrl('(')), just(Token::Ctrl(')'))),
        )
        .map(|(callee, args)| Call { callee, args })
        .labelled("call")
}

// Full expression parser
pub fn expr_parser<'tokens, 'src: 'tokens, I>()
-> impl Parser<'tokens, I, Spanned<Expr<'src>>, extra::Err<Rich<'tokens, Token<'src>, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Token<'src>, Span = Span>,
{
    recursive(|expr| {
        // Literals
        let lit = select! {
            Token::Num(n) => Expr::Int(n),
            Token::Str(s) => Expr::Str(s),
        }
        .labelled("literal");

        // Variables
        let var = ident_parser().map(Expr::Var);

        // Parenthesized expression
        let paren = expr
            .clone()
            .delimited_by(just(Token::Ctrl('(')), just(Token::Ctrl(')')))
            .map(|(e, _)| e);

        let call = call_parser(expr.clone()).map(Expr::Call);

        let atom = call
            .or(paren)
            .or(lit)
            .or(var)
            .map_with(|expr, e| (expr, e.span()))
            .recover_with(via_parser(nested_delimiters(
                Token::Ctrl('('),
                Token::Ctrl(')'),
                [
                    (Token::Ctrl('['), Token::Ctrl(']')),
                    (Token::Ctrl('{'), Token::Ctrl('}')),
                ],
                |span| (Expr::Error, span),
            )))
            .boxed();

        // Array indexing
        let indexed = atom.foldl_with(
            expr.clone()
                .delimited_by(just(Token::Ctrl('[')), just(Token::Ctrl(']')))
                .repeated(),
            |base, index, e| {
                (
                    Expr::Index {
                        base: Box::new(base),
                        index: Box::new(index),
                    },
                    e.span(),
                )
            },
        );

        // Unary operators
        let op_unary = choice((
            just(Token::Op("-")).to(UnaryOp::Neg),
            just(Token::Op("!")).to(UnaryOp::Not),
            just(Token::Op("&")).to(UnaryOp::AddrOf),
            just(Token::Op("*")).to(UnaryOp::Deref),
        ));
        let unary = op_unary
            .repeated()
            .foldr_with(indexed, |op, operand, e| (Expr::unary(op, operand), e.span()));

        // Binary operators with precedence
        // Multiplication, division and remainder
        let op_mul = choice((
            just(Token::Op("*")).to(BinOp::Mul),
            just(Token::Op("/")).to(BinOp::Div),
            just(Token::Op("%")).to(BinOp::Mod),
        ));
        let product = unary
            .clone()
            .foldl_with(op_mul.then(unary).repeated(), |lhs, (op, rhs), e| {
                (Expr::binary(op, lhs, rhs), e.span())
            });

        // Addition and subtraction
        let op_add = just(Token::Op("+")).to(BinOp::Add);
        let op_sub = just(Token::Op("-")).to(BinOp::Sub);
        let sum = product.clone().foldl_with(
            choice((op_add, op_sub)).then(product).repeated(),
            |lhs, (op, rhs), e| (Expr::binary(op, lhs, rhs), e.span()),
        );

        // Relational comparisons
        let op_lt = just(Token::Op("<")).to(BinOp::Lt);
        let op_lte = just(Token::Op("<=")).to(BinOp::Lte);
        let op_gt = just(Token::Op(">")).to(BinOp::Gt);
        let op_gte = just(Token::Op(">=")).to(BinOp::Gte);
        let relation = sum.clone().foldl_with(
            choice((op_lte, op_gte, op_lt, op_gt)).then(sum).repeated(),
            |lhs, (op, rhs), e| (Expr::binary(op, lhs, rhs), e.span()),
        );

        // Equality
        let op_eq = just(Token::Op("==")).to(BinOp::Eq);
        let op_neq = just(Token::Op("!=")).to(BinOp::NotEq);
        let equality = relation.clone().foldl_with(
            choice((op_eq, op_neq)).then(relation).repeated(),
            |lhs, (op, rhs), e| (Expr::binary(op, lhs, rhs), e.span()),
        );

        // Logical operators, `&&` binding tighter than `||`
        let op_and = just(Token::Op("&&")).to(BinOp::And);
        let conjunction = equality.clone().foldl_with(
            op_and.then(equality).repeated(),
            |lhs, (op, rhs), e| (Expr::binary(op, lhs, rhs), e.span()),
        );

        let op_or = just(Token::Op("||")).to(BinOp::Or);
        let disjunction = conjunction.clone().foldl_with(
            op_or.then(conjunction).repeated(),
            |lhs, (op, rhs), e| (Expr::binary(op, lhs, rhs), e.span()),
        );

        disjunction.labelled("expression").as_context()
    })
    .boxed()
}
