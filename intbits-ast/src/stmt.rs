use crate::{
    expr::{Expr, Identifier, SetOp},
    span::Span,
};

#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    Let {
        name: Identifier,
        init: Expr,
    },
    Assign {
        name: Identifier,
        value: Expr,
    },
    /// `name op= value`, applied to the named set in place.
    Update {
        name: Identifier,
        op: SetOp,
        value: Expr,
    },
    Add {
        target: Identifier,
        elems: Vec<Expr>,
    },
    Remove {
        target: Identifier,
        elems: Vec<Expr>,
    },
    Clear(Identifier),
    Compact(Identifier),
    Print(Expr),
}

impl StmtKind {
    pub fn name(&self) -> &'static str {
        match self {
            StmtKind::Let { .. } => "let",
            StmtKind::Assign { .. } => "assign",
            StmtKind::Update { .. } => "update",
            StmtKind::Add { .. } => "add",
            StmtKind::Remove { .. } => "remove",
            StmtKind::Clear(_) => "clear",
            StmtKind::Compact(_) => "compact",
            StmtKind::Print(_) => "print",
        }
    }
}
