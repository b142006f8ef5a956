use std::fmt;

use intbits_ast::{span::Span, token::TokenKind};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct ParseError<'src> {
    pub kind: ParseErrorKind<'src>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind<'src> {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: ExpectedItem<'src>,
        found: TokenKind<'src>,
    },
    #[error("expected {expected}, found end of input")]
    UnexpectedEof { expected: ExpectedItem<'src> },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExpectedItem<'src> {
    Stmt,
    Expr,
    Ident,
    Token(TokenKind<'src>),
}

impl fmt::Display for ExpectedItem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedItem::Stmt => f.write_str("a statement"),
            ExpectedItem::Expr => f.write_str("an expression"),
            ExpectedItem::Ident => f.write_str("an identifier"),
            ExpectedItem::Token(kind) => write!(f, "{kind}"),
        }
    }
}
