use std::io::Write;

use intbits_ast::{
    expr::{Builtin, Expr, ExprKind, Identifier, Literal, SetOp},
    span::Span,
    stmt::{Stmt, StmtKind},
    string::Interner,
};
use intbits_set::BitSet;
use tracing::{debug, trace};

use crate::{
    env::Environment,
    error::{RuntimeError, RuntimeErrorKind},
    value::Value,
};

/// Runs statements against a set of named values, writing `print` output to
/// `out`.
///
/// The interpreter owns the interner its programs were parsed with, so the
/// same instance can run one program after another and keep its variables.
pub struct Interpreter<W: Write> {
    env: Environment,
    interner: Interner,
    out: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Self {
            env: Environment::new(),
            interner: Interner::new(),
            out,
        }
    }

    pub fn interner_mut(&mut self) -> &mut Interner {
        &mut self.interner
    }

    pub fn into_out(self) -> W {
        self.out
    }

    pub fn interpret(&mut self, stmts: &[Stmt]) -> Result<(), RuntimeError> {
        for stmt in stmts {
            self.exec(stmt)?;
        }
        Ok(())
    }

    fn exec(&mut self, stmt: &Stmt) -> Result<(), RuntimeError> {
        debug!(
            stmt = stmt.kind.name(),
            start = stmt.span.start,
            end = stmt.span.end,
            "executing statement"
        );

        match &stmt.kind {
            StmtKind::Let { name, init } => {
                let value = self.eval(init)?;
                trace!(name = name_of(&self.interner, name), %value, "define");
                self.env.define(name.symbol, value);
            }
            StmtKind::Assign { name, value } => {
                let value = self.eval(value)?;
                *self.lookup_mut(name, stmt.span)? = value;
            }
            StmtKind::Update { name, op, value } => {
                let other = self.eval_set(value)?;
                let target = self.set_mut(name, stmt.span)?;
                apply(*op, target, &other);
            }
            StmtKind::Add { target, elems } => {
                let mut ints = Vec::new();
                let mut sets = Vec::new();

                for expr in elems {
                    match self.eval(expr)? {
                        Value::Int(n) => ints.push(n),
                        Value::Set(set) => sets.push(set),
                        other => {
                            return Err(type_error("int or set", &other, expr.span));
                        }
                    }
                }

                let target = self.set_mut(target, stmt.span)?;
                target.try_insert_all(ints).map_err(|error| RuntimeError {
                    kind: error.into(),
                    span: stmt.span,
                })?;
                for set in &sets {
                    target.union_with(set);
                }
            }
            StmtKind::Remove { target, elems } => {
                let ints = elems
                    .iter()
                    .map(|expr| self.eval_int(expr))
                    .collect::<Result<Vec<_>, _>>()?;

                let target = self.set_mut(target, stmt.span)?;
                for n in ints {
                    target.remove(n).map_err(|error| RuntimeError {
                        kind: error.into(),
                        span: stmt.span,
                    })?;
                }
            }
            StmtKind::Clear(target) => self.set_mut(target, stmt.span)?.clear(),
            StmtKind::Compact(target) => {
                self.set_mut(target, stmt.span)?.compact()
            }
            StmtKind::Print(expr) => {
                let value = self.eval(expr)?;
                writeln!(self.out, "{value}").map_err(|error| RuntimeError {
                    kind: error.into(),
                    span: stmt.span,
                })?;
            }
        };

        Ok(())
    }

    fn eval(&self, expr: &Expr) -> Result<Value, RuntimeError> {
        let value = match &expr.kind {
            ExprKind::Literal(Literal::Number(n)) => Value::Int(*n),
            ExprKind::Literal(Literal::Bool(b)) => Value::Bool(*b),
            ExprKind::Grouping(inner) => self.eval(inner)?,
            ExprKind::Variable(name) => match self.lookup(name, expr.span)? {
                Value::Set(set) => Value::Set(set.copy()),
                other => other.clone(),
            },
            ExprKind::SetLiteral(elems) => {
                let mut set = BitSet::new();
                for elem in elems {
                    match self.eval(elem)? {
                        Value::Int(n) => {
                            set.try_insert(n).map_err(|error| RuntimeError {
                                kind: error.into(),
                                span: elem.span,
                            })?;
                        }
                        Value::Set(other) => set.union_with(&other),
                        other => {
                            return Err(type_error("int or set", &other, elem.span));
                        }
                    }
                }
                Value::Set(set)
            }
            ExprKind::Binary { left, op, right } => {
                let mut left = self.eval_set(left)?;
                let right = self.eval_set(right)?;
                apply(*op, &mut left, &right);
                Value::Set(left)
            }
            ExprKind::Builtin { func, args } => {
                self.call_builtin(*func, args, expr.span)?
            }
        };

        Ok(value)
    }

    fn call_builtin(
        &self,
        func: Builtin,
        args: &[Expr],
        span: Span,
    ) -> Result<Value, RuntimeError> {
        if args.len() != func.arity() {
            return Err(RuntimeError {
                kind: RuntimeErrorKind::ArityMismatch {
                    func,
                    expected: func.arity(),
                    found: args.len(),
                },
                span,
            });
        }

        let set = self.eval_set(&args[0])?;
        let value = match func {
            Builtin::Len => Value::Int(set.len()),
            Builtin::Has => Value::Bool(set.contains(self.eval_int(&args[1])?)),
            Builtin::Elems => Value::List(set.elems()),
            Builtin::Copy => Value::Set(set.copy()),
        };

        Ok(value)
    }

    fn eval_set(&self, expr: &Expr) -> Result<BitSet, RuntimeError> {
        match self.eval(expr)? {
            Value::Set(set) => Ok(set),
            other => Err(type_error("set", &other, expr.span)),
        }
    }

    fn eval_int(&self, expr: &Expr) -> Result<usize, RuntimeError> {
        match self.eval(expr)? {
            Value::Int(n) => Ok(n),
            other => Err(type_error("int", &other, expr.span)),
        }
    }

    fn lookup(&self, name: &Identifier, span: Span) -> Result<&Value, RuntimeError> {
        self.env
            .get(name.symbol)
            .ok_or_else(|| undefined(&self.interner, name, span))
    }

    fn lookup_mut(
        &mut self,
        name: &Identifier,
        span: Span,
    ) -> Result<&mut Value, RuntimeError> {
        let Self { env, interner, .. } = self;
        env.get_mut(name.symbol)
            .ok_or_else(|| undefined(interner, name, span))
    }

    fn set_mut(
        &mut self,
        name: &Identifier,
        span: Span,
    ) -> Result<&mut BitSet, RuntimeError> {
        match self.lookup_mut(name, span)? {
            Value::Set(set) => Ok(set),
            other => Err(type_error("set", other, span)),
        }
    }
}

fn name_of<'a>(interner: &'a Interner, name: &Identifier) -> &'a str {
    interner.resolve(name.symbol).unwrap_or("<unknown>")
}

fn undefined(interner: &Interner, name: &Identifier, span: Span) -> RuntimeError {
    RuntimeError {
        kind: RuntimeErrorKind::UndefinedVariable(
            name_of(interner, name).to_string(),
        ),
        span,
    }
}

fn apply(op: SetOp, target: &mut BitSet, other: &BitSet) {
    match op {
        SetOp::Union => target.union_with(other),
        SetOp::Intersect => target.intersect_with(other),
        SetOp::Difference => target.difference_with(other),
        SetOp::SymmetricDifference => target.symmetric_difference_with(other),
    }
}

fn type_error(expected: &'static str, found: &Value, span: Span) -> RuntimeError {
    RuntimeError {
        kind: RuntimeErrorKind::TypeError {
            expected,
            found: found.type_name(),
        },
        span,
    }
}

#[cfg(test)]
mod tests;
