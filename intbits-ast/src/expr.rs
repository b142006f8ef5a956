use std::fmt;

use crate::{
    span::Span,
    string::InternSymbol,
    token::{Keyword, TokenKind},
};

#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    Binary {
        left: Box<Expr>,
        op: SetOp,
        right: Box<Expr>,
    },
    Grouping(Box<Expr>),
    Literal(Literal),
    SetLiteral(Vec<Expr>),
    Variable(Identifier),
    Builtin {
        func: Builtin,
        args: Vec<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identifier {
    pub symbol: InternSymbol,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal {
    Number(usize),
    Bool(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOp {
    Union,
    Intersect,
    Difference,
    SymmetricDifference,
}

bijective_enum_map::injective_enum_map! {
    SetOp, TokenKind<'_>,
    Union <=> TokenKind::Pipe,
    Intersect <=> TokenKind::Amp,
    Difference <=> TokenKind::Minus,
    SymmetricDifference <=> TokenKind::Caret,
}

/// A compound assignment operator such as `|=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundOp {
    Union,
    Intersect,
    Difference,
    SymmetricDifference,
}

bijective_enum_map::injective_enum_map! {
    CompoundOp, TokenKind<'_>,
    Union <=> TokenKind::PipeEqual,
    Intersect <=> TokenKind::AmpEqual,
    Difference <=> TokenKind::MinusEqual,
    SymmetricDifference <=> TokenKind::CaretEqual,
}

bijective_enum_map::injective_enum_map! {
    CompoundOp, SetOp,
    Union <=> SetOp::Union,
    Intersect <=> SetOp::Intersect,
    Difference <=> SetOp::Difference,
    SymmetricDifference <=> SetOp::SymmetricDifference,
}

impl SetOp {
    /// Maps a compound assignment token such as `|=` to its operator.
    pub fn from_compound(kind: TokenKind<'_>) -> Option<SetOp> {
        CompoundOp::try_from(kind).ok().map(SetOp::from)
    }
}

impl fmt::Display for SetOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            SetOp::Union => "|",
            SetOp::Intersect => "&",
            SetOp::Difference => "-",
            SetOp::SymmetricDifference => "^",
        };
        f.write_str(symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Len,
    Has,
    Elems,
    Copy,
}

bijective_enum_map::injective_enum_map! {
    Builtin, Keyword,
    Len <=> Keyword::Len,
    Has <=> Keyword::Has,
    Elems <=> Keyword::Elems,
    Copy <=> Keyword::Copy,
}

impl Builtin {
    pub fn arity(self) -> usize {
        match self {
            Builtin::Has => 2,
            Builtin::Len | Builtin::Elems | Builtin::Copy => 1,
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Keyword::from(*self).as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_ops_map_to_operator_tokens() {
        assert_eq!(SetOp::try_from(TokenKind::Pipe).ok(), Some(SetOp::Union));
        assert_eq!(SetOp::try_from(TokenKind::Caret).ok(), Some(SetOp::SymmetricDifference));
        assert!(SetOp::try_from(TokenKind::Comma).is_err());
        assert_eq!(TokenKind::from(SetOp::Difference), TokenKind::Minus);
    }

    #[test]
    fn compound_tokens_map_to_ops() {
        assert_eq!(SetOp::from_compound(TokenKind::AmpEqual), Some(SetOp::Intersect));
        assert_eq!(SetOp::from_compound(TokenKind::Amp), None);
        assert_eq!(
            CompoundOp::try_from(SetOp::Difference).map(TokenKind::from),
            Ok(TokenKind::MinusEqual)
        );
    }

    #[test]
    fn builtins_follow_keywords() {
        assert_eq!(Builtin::try_from(Keyword::Has).ok(), Some(Builtin::Has));
        assert!(Builtin::try_from(Keyword::Let).is_err());
        assert_eq!(Builtin::Elems.to_string(), "elems");
        assert_eq!(Builtin::Has.arity(), 2);
    }
}
