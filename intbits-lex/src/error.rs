use intbits_ast::span::Span;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ScanError {
    pub kind: ScanErrorKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanErrorKind {
    #[error("unexpected character `{0}`")]
    UnexpectedCharacter(char),
    #[error("number `{0}` is too large")]
    NumberOutOfRange(String),
}
