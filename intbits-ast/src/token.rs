use std::fmt;

use crate::span::Span;

#[derive(Debug, Clone, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind<'src>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'src> {
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    Equal,
    Pipe,
    Amp,
    Minus,
    Caret,
    PipeEqual,
    AmpEqual,
    MinusEqual,
    CaretEqual,
    Identifier(&'src str),
    Number(usize),
    Keyword(Keyword),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Let,
    Print,
    Add,
    Remove,
    Clear,
    Compact,
    Len,
    Has,
    Elems,
    Copy,
    True,
    False,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Let => "let",
            Keyword::Print => "print",
            Keyword::Add => "add",
            Keyword::Remove => "remove",
            Keyword::Clear => "clear",
            Keyword::Compact => "compact",
            Keyword::Len => "len",
            Keyword::Has => "has",
            Keyword::Elems => "elems",
            Keyword::Copy => "copy",
            Keyword::True => "true",
            Keyword::False => "false",
        }
    }
}

impl TryFrom<&str> for Keyword {
    type Error = ();
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let keyword = match value {
            "let" => Keyword::Let,
            "print" => Keyword::Print,
            "add" => Keyword::Add,
            "remove" => Keyword::Remove,
            "clear" => Keyword::Clear,
            "compact" => Keyword::Compact,
            "len" => Keyword::Len,
            "has" => Keyword::Has,
            "elems" => Keyword::Elems,
            "copy" => Keyword::Copy,
            "true" => Keyword::True,
            "false" => Keyword::False,
            _ => return Err(()),
        };

        Ok(keyword)
    }
}

impl fmt::Display for TokenKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let punct = match self {
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Equal => "=",
            TokenKind::Pipe => "|",
            TokenKind::Amp => "&",
            TokenKind::Minus => "-",
            TokenKind::Caret => "^",
            TokenKind::PipeEqual => "|=",
            TokenKind::AmpEqual => "&=",
            TokenKind::MinusEqual => "-=",
            TokenKind::CaretEqual => "^=",
            TokenKind::Identifier(name) => return write!(f, "identifier `{name}`"),
            TokenKind::Number(n) => return write!(f, "number `{n}`"),
            TokenKind::Keyword(keyword) => keyword.as_str(),
        };
        write!(f, "`{punct}`")
    }
}
