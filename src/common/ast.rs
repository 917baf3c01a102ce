use super::span::{Span, Spanned};
use std::fmt;

// Token definition
#[derive(Clone, Debug, PartialEq)]
pub enum Token<'src> {
    Num(i64),
    // String literal lexeme, quotes included
    Str(&'src str),
    Ident(&'src str),
    Op(&'src str),
    Ctrl(char),
    // Keywords
    Int,
    Void,
    If,
    Else,
    While,
    For,
    Return,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Num(n) => write!(f, "{n}"),
            Token::Str(s) => write!(f, "{s}"),
            Token::Ident(s) => write!(f, "{s}"),
            Token::Op(s) => write!(f, "{s}"),
            Token::Ctrl(c) => write!(f, "{c}"),
            Token::Int => write!(f, "int"),
            Token::Void => write!(f, "void"),
            Token::If => write!(f, "if"),
            Token::Else => write!(f, "else"),
            Token::While => write!(f, "while"),
            Token::For => write!(f, "for"),
            Token::Return => write!(f, "return"),
        }
    }
}

// Binary operators
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    Gt,
    Lte,
    Gte,
    And,
    Or,
}

// Unary operators
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
    AddrOf,
    Deref,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BaseType {
    Int,
    Void,
}

/// Declared type of a variable, parameter or function result.
///
/// Code generation ignores types; they are kept so the tree mirrors the
/// source faithfully.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Type {
    pub base: BaseType,
    pub pointers: usize,
    pub array_len: Option<usize>,
}

impl Type {
    pub fn int() -> Self {
        Self {
            base: BaseType::Int,
            pointers: 0,
            array_len: None,
        }
    }
}

/// An identifier occurrence: its lexeme and where it was written
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ident<'src> {
    pub name: &'src str,
    pub span: Span,
}

impl<'src> Ident<'src> {
    pub fn new(name: &'src str, span: Span) -> Self {
        Self { name, span }
    }
}

// Expression nodes
#[derive(Clone, Debug)]
pub enum Expr<'src> {
    // Placeholder left by parser recovery
    Error,
    Int(i64),
    Str(&'src str),
    Var(Ident<'src>),
    Index {
        base: Box<Spanned<Self>>,
        index: Box<Spanned<Self>>,
    },
    Call(Call<'src>),
    Unary {
        op: UnaryOp,
        operand: Box<Spanned<Self>>,
    },
    Binary {
        op: BinOp,
        lhs: Box<Spanned<Self>>,
        rhs: Box<Spanned<Self>>,
    },
}

impl<'src> Expr<'src> {
    pub fn unary(op: UnaryOp, operand: Spanned<Self>) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinOp, lhs: Spanned<Self>, rhs: Spanned<Self>) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Call<'src> {
    pub callee: Ident<'src>,
    pub args: Vec<Spanned<Expr<'src>>>,
}

// Statement nodes
#[derive(Clone, Debug)]
pub enum Stmt<'src> {
    Assign {
        lhs: Spanned<Expr<'src>>,
        rhs: Spanned<Expr<'src>>,
    },
    If {
        cond: Spanned<Expr<'src>>,
        then_block: Block<'src>,
    },
    IfElse {
        cond: Spanned<Expr<'src>>,
        then_block: Block<'src>,
        else_block: Block<'src>,
    },
    While {
        cond: Spanned<Expr<'src>>,
        body: Block<'src>,
    },
    For {
        init: Box<Spanned<Stmt<'src>>>,
        cond: Spanned<Expr<'src>>,
        step: Box<Spanned<Stmt<'src>>>,
        body: Block<'src>,
    },
    Call(Call<'src>),
    Return(Option<Spanned<Expr<'src>>>),
}

/// Local declarations followed by statements: a function body or the body
/// of an `if`/`else`/`while`/`for`.
#[derive(Clone, Debug, Default)]
pub struct Block<'src> {
    pub decls: Vec<VarDecl<'src>>,
    pub stmts: Vec<Spanned<Stmt<'src>>>,
}

#[derive(Clone, Debug)]
pub struct VarDecl<'src> {
    pub ty: Type,
    pub name: Ident<'src>,
}

#[derive(Clone, Debug)]
pub struct Function<'src> {
    pub return_type: Type,
    pub name: Ident<'src>,
    pub params: Vec<VarDecl<'src>>,
    pub body: Block<'src>,
}

// Forward declaration: signature only
#[derive(Clone, Debug)]
pub struct Prototype<'src> {
    pub return_type: Type,
    pub name: Ident<'src>,
    pub params: Vec<VarDecl<'src>>,
}

#[derive(Clone, Debug)]
pub enum Decl<'src> {
    Var(VarDecl<'src>),
    Function(Function<'src>),
    Prototype(Prototype<'src>),
}

#[derive(Clone, Debug, Default)]
pub struct Program<'src> {
    pub decls: Vec<Spanned<Decl<'src>>>,
}
