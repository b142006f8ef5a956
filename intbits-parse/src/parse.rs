use std::iter::Peekable;

use intbits_ast::{
    expr::{Builtin, Expr, ExprKind, Identifier, Literal, SetOp},
    span::Span,
    stmt::{Stmt, StmtKind},
    string::Interner,
    token::{Keyword, Token, TokenKind},
};

use crate::error::{ExpectedItem, ParseError, ParseErrorKind};

type ParseResult<'src, T> = Result<T, ParseError<'src>>;

pub struct Parser<'src, 'i, I>
where
    I: Iterator<Item = Token<'src>>,
{
    tokens: Peekable<I>,
    eof_span: Span,
    interner: &'i mut Interner,
}

impl<'src, 'i, I> Parser<'src, 'i, I>
where
    I: Iterator<Item = Token<'src>>,
{
    /// Identifiers are interned into `interner`, so symbols stay valid for
    /// as long as the interner lives, not just the source text.
    pub fn new(
        tokens: Peekable<I>,
        eof_span: Span,
        interner: &'i mut Interner,
    ) -> Self {
        Self {
            tokens,
            eof_span,
            interner,
        }
    }

    pub fn parse(&mut self) -> ParseResult<'src, Vec<Stmt>> {
        let mut stmts = Vec::new();
        while self.peek().is_some() {
            stmts.push(self.statement()?);
        }
        Ok(stmts)
    }

    fn statement(&mut self) -> ParseResult<'src, Stmt> {
        let &Token { kind, span } = self.peek_or_err(ExpectedItem::Stmt)?;

        match kind {
            TokenKind::Keyword(Keyword::Let) => {
                self.advance().unwrap();
                self.let_statement(span)
            }
            TokenKind::Keyword(Keyword::Print) => {
                self.advance().unwrap();
                let expr = self.expression()?;
                self.finish(span, StmtKind::Print(expr))
            }
            TokenKind::Keyword(Keyword::Add) => {
                self.advance().unwrap();
                self.elems_statement(span, |target, elems| StmtKind::Add {
                    target,
                    elems,
                })
            }
            TokenKind::Keyword(Keyword::Remove) => {
                self.advance().unwrap();
                self.elems_statement(span, |target, elems| {
                    StmtKind::Remove { target, elems }
                })
            }
            TokenKind::Keyword(Keyword::Clear) => {
                self.advance().unwrap();
                let (target, _) = self.identifier()?;
                self.finish(span, StmtKind::Clear(target))
            }
            TokenKind::Keyword(Keyword::Compact) => {
                self.advance().unwrap();
                let (target, _) = self.identifier()?;
                self.finish(span, StmtKind::Compact(target))
            }
            TokenKind::Identifier(_) => self.assign_statement(),
            found => Err(ParseError {
                kind: ParseErrorKind::UnexpectedToken {
                    expected: ExpectedItem::Stmt,
                    found,
                },
                span,
            }),
        }
    }

    fn let_statement(&mut self, let_span: Span) -> ParseResult<'src, Stmt> {
        let (name, _) = self.identifier()?;
        self.consume(&TokenKind::Equal)?;
        let init = self.expression()?;
        self.finish(let_span, StmtKind::Let { name, init })
    }

    fn assign_statement(&mut self) -> ParseResult<'src, Stmt> {
        let (name, name_span) = self.identifier()?;
        let token =
            self.advance_or_err(ExpectedItem::Token(TokenKind::Equal))?;

        let kind = match token.kind {
            TokenKind::Equal => StmtKind::Assign {
                name,
                value: self.expression()?,
            },
            found => match SetOp::from_compound(found) {
                Some(op) => StmtKind::Update {
                    name,
                    op,
                    value: self.expression()?,
                },
                None => {
                    return Err(ParseError {
                        kind: ParseErrorKind::UnexpectedToken {
                            expected: ExpectedItem::Token(TokenKind::Equal),
                            found,
                        },
                        span: token.span,
                    });
                }
            },
        };

        self.finish(name_span, kind)
    }

    fn elems_statement(
        &mut self,
        keyword_span: Span,
        make: impl FnOnce(Identifier, Vec<Expr>) -> StmtKind,
    ) -> ParseResult<'src, Stmt> {
        let (target, _) = self.identifier()?;
        let elems = self.expression_list()?;
        self.finish(keyword_span, make(target, elems))
    }

    /// Consumes the terminating `;` and wraps `kind` into a statement.
    fn finish(
        &mut self,
        start: Span,
        kind: StmtKind,
    ) -> ParseResult<'src, Stmt> {
        let semi = self.consume(&TokenKind::Semicolon)?;
        Ok(Stmt {
            kind,
            span: start.with_end_from(semi.span),
        })
    }

    fn expression_list(&mut self) -> ParseResult<'src, Vec<Expr>> {
        let mut exprs = vec![self.expression()?];

        while self.check_kind(&TokenKind::Comma) {
            self.advance().unwrap();
            exprs.push(self.expression()?);
        }

        Ok(exprs)
    }

    fn expression(&mut self) -> ParseResult<'src, Expr> {
        self.union()
    }

    fn union(&mut self) -> ParseResult<'src, Expr> {
        self.binary(SetOp::Union, Self::symmetric_difference)
    }

    fn symmetric_difference(&mut self) -> ParseResult<'src, Expr> {
        self.binary(SetOp::SymmetricDifference, Self::intersection)
    }

    fn intersection(&mut self) -> ParseResult<'src, Expr> {
        self.binary(SetOp::Intersect, Self::difference)
    }

    fn difference(&mut self) -> ParseResult<'src, Expr> {
        self.binary(SetOp::Difference, Self::primary)
    }

    /// Parses a left-associative chain of `op` over operands parsed by
    /// `operand`.
    fn binary(
        &mut self,
        op: SetOp,
        operand: fn(&mut Self) -> ParseResult<'src, Expr>,
    ) -> ParseResult<'src, Expr> {
        let mut expr = operand(self)?;

        while self.check_kind(&TokenKind::from(op)) {
            self.advance().unwrap();
            let right = operand(self)?;
            let span = expr.span.with_end_from(right.span);

            expr = Expr {
                kind: ExprKind::Binary {
                    left: Box::new(expr),
                    op,
                    right: Box::new(right),
                },
                span,
            };
        }

        Ok(expr)
    }

    fn primary(&mut self) -> ParseResult<'src, Expr> {
        let token = self.advance_or_err(ExpectedItem::Expr)?;

        let expr = match token.kind {
            TokenKind::Number(n) => Expr {
                kind: ExprKind::Literal(Literal::Number(n)),
                span: token.span,
            },
            TokenKind::Keyword(Keyword::True) => Expr {
                kind: ExprKind::Literal(Literal::Bool(true)),
                span: token.span,
            },
            TokenKind::Keyword(Keyword::False) => Expr {
                kind: ExprKind::Literal(Literal::Bool(false)),
                span: token.span,
            },
            TokenKind::Keyword(keyword) => match Builtin::try_from(keyword) {
                Ok(func) => self.builtin_call(func, token.span)?,
                Err(_) => {
                    return Err(ParseError {
                        kind: ParseErrorKind::UnexpectedToken {
                            expected: ExpectedItem::Expr,
                            found: token.kind,
                        },
                        span: token.span,
                    });
                }
            },
            TokenKind::Identifier(name) => Expr {
                kind: ExprKind::Variable(self.intern(name)),
                span: token.span,
            },
            TokenKind::LParen => {
                let expr = Box::new(self.expression()?);
                let r_paren = self.consume(&TokenKind::RParen)?;
                Expr {
                    kind: ExprKind::Grouping(expr),
                    span: token.span.with_end_from(r_paren.span),
                }
            }
            TokenKind::LBrace => self.set_literal(token.span)?,
            _ => {
                return Err(ParseError {
                    kind: ParseErrorKind::UnexpectedToken {
                        expected: ExpectedItem::Expr,
                        found: token.kind,
                    },
                    span: token.span,
                });
            }
        };

        Ok(expr)
    }

    fn builtin_call(
        &mut self,
        func: Builtin,
        name_span: Span,
    ) -> ParseResult<'src, Expr> {
        self.consume(&TokenKind::LParen)?;

        let args = if self.check_kind(&TokenKind::RParen) {
            Vec::new()
        } else {
            self.expression_list()?
        };

        let r_paren = self.consume(&TokenKind::RParen)?;

        Ok(Expr {
            kind: ExprKind::Builtin { func, args },
            span: name_span.with_end_from(r_paren.span),
        })
    }

    /// Elements are separated by whitespace, commas, or both.
    fn set_literal(&mut self, l_brace_span: Span) -> ParseResult<'src, Expr> {
        let mut elems = Vec::new();

        while let Some(token) = self.peek()
            && !matches!(token.kind, TokenKind::RBrace)
        {
            elems.push(self.expression()?);

            if self.check_kind(&TokenKind::Comma) {
                self.advance().unwrap();
            }
        }

        let r_brace = self.consume(&TokenKind::RBrace)?;

        Ok(Expr {
            kind: ExprKind::SetLiteral(elems),
            span: l_brace_span.with_end_from(r_brace.span),
        })
    }

    fn identifier(&mut self) -> ParseResult<'src, (Identifier, Span)> {
        let token = self.advance_or_err(ExpectedItem::Ident)?;

        match token.kind {
            TokenKind::Identifier(name) => Ok((self.intern(name), token.span)),
            found => Err(ParseError {
                kind: ParseErrorKind::UnexpectedToken {
                    expected: ExpectedItem::Ident,
                    found,
                },
                span: token.span,
            }),
        }
    }

    fn intern(&mut self, name: &str) -> Identifier {
        Identifier {
            symbol: self.interner.get_or_intern(name),
        }
    }

    fn consume(&mut self, kind: &TokenKind<'src>) -> ParseResult<'src, Token<'src>> {
        if self.check_kind(kind) {
            return self.advance().ok_or_else(|| unreachable!());
        }

        Err(ParseError {
            kind: ParseErrorKind::UnexpectedToken {
                expected: ExpectedItem::Token(*kind),
                found: self.peek_or_err(ExpectedItem::Token(*kind))?.kind,
            },
            span: self.peek_span(),
        })
    }

    fn check_kind(&mut self, kind: &TokenKind) -> bool {
        self.peek()
            .map(|token| match token.kind {
                TokenKind::Number(_) | TokenKind::Identifier(_) => {
                    std::mem::discriminant(&token.kind)
                        == std::mem::discriminant(kind)
                }

                _ => &token.kind == kind,
            })
            .unwrap_or(false)
    }

    fn peek(&mut self) -> Option<&Token<'src>> {
        self.tokens.peek()
    }

    fn peek_or_err(
        &mut self,
        expected: ExpectedItem<'src>,
    ) -> ParseResult<'src, &Token<'src>> {
        let eof_span = self.eof_span;
        self.peek().ok_or(ParseError {
            kind: ParseErrorKind::UnexpectedEof { expected },
            span: eof_span,
        })
    }

    fn peek_span(&mut self) -> Span {
        match self.peek() {
            Some(token) => token.span,
            None => self.eof_span,
        }
    }

    fn advance(&mut self) -> Option<Token<'src>> {
        self.tokens.next()
    }

    fn advance_or_err(
        &mut self,
        expected: ExpectedItem<'src>,
    ) -> ParseResult<'src, Token<'src>> {
        let Some(token) = self.advance() else {
            return Err(ParseError {
                kind: ParseErrorKind::UnexpectedEof { expected },
                span: self.eof_span,
            });
        };

        Ok(token)
    }
}
