use std::io;

use intbits_ast::{expr::Builtin, span::Span};
use intbits_set::BitSetError;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{kind}")]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub span: Span,
}

#[derive(Debug, Error)]
pub enum RuntimeErrorKind {
    #[error("undefined variable `{0}`")]
    UndefinedVariable(String),
    #[error("expected {expected}, found {found}")]
    TypeError {
        expected: &'static str,
        found: &'static str,
    },
    #[error("`{func}` takes {expected} argument(s) but {found} were given")]
    ArityMismatch {
        func: Builtin,
        expected: usize,
        found: usize,
    },
    #[error(transparent)]
    Set(#[from] BitSetError),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}
