use std::{iter::Peekable, str::CharIndices};

use intbits_ast::{
    span::Span,
    token::{Keyword, Token, TokenKind},
};

use crate::error::{ScanError, ScanErrorKind};

pub struct Scanner<'src> {
    source: &'src str,
    chars: Peekable<CharIndices<'src>>,
    start: usize,
    current: usize,
}

pub struct ScanTokens<'src> {
    pub tokens: Vec<Token<'src>>,
    pub eof_span: Span,
    pub errors: Vec<ScanError>,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            start: 0,
            current: 0,
        }
    }

    /// Scans the whole source. Errors are collected and scanning continues
    /// after the offending character.
    pub fn scan_tokens(&mut self) -> ScanTokens<'src> {
        let mut tokens = Vec::new();
        let mut errors = Vec::new();

        while let Some(token) = self.scan_token() {
            match token {
                Ok(token) => tokens.push(token),
                Err(error) => errors.push(error),
            }
        }

        ScanTokens {
            tokens,
            eof_span: Span::empty_at(self.source.len()),
            errors,
        }
    }

    fn scan_token(&mut self) -> Option<Result<Token<'src>, ScanError>> {
        self.skip_trivia();
        self.start = self.current;

        let char = self.advance()?;
        let token = match char {
            '(' => self.make_token(TokenKind::LParen),
            ')' => self.make_token(TokenKind::RParen),
            '{' => self.make_token(TokenKind::LBrace),
            '}' => self.make_token(TokenKind::RBrace),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            '=' => self.make_token(TokenKind::Equal),
            '|' => self.operator(TokenKind::Pipe, TokenKind::PipeEqual),
            '&' => self.operator(TokenKind::Amp, TokenKind::AmpEqual),
            '-' => self.operator(TokenKind::Minus, TokenKind::MinusEqual),
            '^' => self.operator(TokenKind::Caret, TokenKind::CaretEqual),
            digit if digit.is_ascii_digit() => match self.number() {
                Ok(token) => token,
                Err(error) => return Some(Err(error)),
            },
            c if unicode_ident::is_xid_start(c) || c == '_' => self.identifier(),
            _ => {
                return Some(Err(
                    self.make_error(ScanErrorKind::UnexpectedCharacter(char))
                ));
            }
        };

        Some(Ok(token))
    }

    fn operator(
        &mut self,
        plain: TokenKind<'src>,
        assign: TokenKind<'src>,
    ) -> Token<'src> {
        if self.match_char('=') {
            self.make_token(assign)
        } else {
            self.make_token(plain)
        }
    }

    fn number(&mut self) -> Result<Token<'src>, ScanError> {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        let text = &self.source[self.start..self.current];
        match text.parse() {
            Ok(n) => Ok(self.make_token(TokenKind::Number(n))),
            Err(_) => Err(self.make_error(ScanErrorKind::NumberOutOfRange(
                text.to_string(),
            ))),
        }
    }

    fn identifier(&mut self) -> Token<'src> {
        while self.peek().is_some_and(unicode_ident::is_xid_continue) {
            self.advance();
        }

        let text = &self.source[self.start..self.current];
        match Keyword::try_from(text) {
            Ok(keyword) => self.make_token(TokenKind::Keyword(keyword)),
            Err(()) => self.make_token(TokenKind::Identifier(text)),
        }
    }

    fn is_comment(&mut self) -> bool {
        self.peek().is_some_and(|c| {
            c == '/' && self.peek_next().is_some_and(|c| c == '/')
        })
    }

    /// Skips whitespace and comments.
    fn skip_trivia(&mut self) {
        loop {
            if self.peek().is_some_and(|c| c.is_whitespace()) {
                self.advance();
            } else if self.is_comment() {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        let Some(next) = self.peek() else {
            return false;
        };

        if next == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    fn make_token(&self, kind: TokenKind<'src>) -> Token<'src> {
        Token {
            kind,
            span: self.make_span(),
        }
    }

    fn make_span(&self) -> Span {
        Span {
            start: self.start,
            end: self.current,
        }
    }

    fn make_error(&self, kind: ScanErrorKind) -> ScanError {
        ScanError {
            kind,
            span: self.make_span(),
        }
    }

    fn advance(&mut self) -> Option<char> {
        let (index, char) = self.chars.next()?;
        self.current = index + char.len_utf8();
        Some(char)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|c| c.1)
    }

    fn peek_next(&mut self) -> Option<char> {
        self.source[self.current..].chars().nth(1)
    }
}

impl<'src> Iterator for Scanner<'src> {
    type Item = Result<Token<'src>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.scan_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn kinds(source: &str) -> Vec<TokenKind<'_>> {
        Scanner::new(source)
            .scan_tokens()
            .tokens
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn new_initializes_scanner() {
        let src = "abc";
        let scanner = Scanner::new(src);
        assert_eq!(scanner.source, src);
        assert_eq!(scanner.start, 0);
        assert_eq!(scanner.current, 0);
    }

    #[test]
    fn advance_and_peek_update_positions() {
        let mut scanner = Scanner::new("a\nb");
        assert_eq!(scanner.peek(), Some('a'));
        assert_eq!(scanner.peek_next(), Some('\n'));
        assert_eq!(scanner.advance(), Some('a'));
        assert_eq!(scanner.current, 1);
        assert_eq!(scanner.advance(), Some('\n'));
        assert_eq!(scanner.peek(), Some('b'));
        assert_eq!(scanner.advance(), Some('b'));
        assert_eq!(scanner.current, 3);
        assert_eq!(scanner.advance(), None);
    }

    #[test]
    fn match_char_advances_on_match() {
        let mut scanner = Scanner::new("|=");
        scanner.advance();
        assert!(scanner.match_char('='));
        assert_eq!(scanner.current, 2);
        assert!(!scanner.match_char('='));
    }

    #[test]
    fn skip_ignores_whitespace_and_comments() {
        let mut scanner = Scanner::new("  // note\n\t// more\nabc");
        scanner.skip_trivia();
        assert_eq!(scanner.peek(), Some('a'));
    }

    #[test_case("|", TokenKind::Pipe; "pipe")]
    #[test_case("|=", TokenKind::PipeEqual; "pipe equal")]
    #[test_case("&", TokenKind::Amp; "amp")]
    #[test_case("&=", TokenKind::AmpEqual; "amp equal")]
    #[test_case("-", TokenKind::Minus; "minus")]
    #[test_case("-=", TokenKind::MinusEqual; "minus equal")]
    #[test_case("^", TokenKind::Caret; "caret")]
    #[test_case("^=", TokenKind::CaretEqual; "caret equal")]
    #[test_case("=", TokenKind::Equal; "equal")]
    fn scans_operator(source: &str, expected: TokenKind<'static>) {
        assert_eq!(kinds(source), vec![expected]);
    }

    #[test]
    fn number_literal_scanned() {
        let mut scanner = Scanner::new("144");
        scanner.advance();
        let token = scanner.number().unwrap();
        assert_eq!(token.kind, TokenKind::Number(144));
        assert_eq!(token.span, Span { start: 0, end: 3 });
    }

    #[test]
    fn oversized_number_is_an_error() {
        let source = "99999999999999999999999999";
        let result = Scanner::new(source).scan_tokens();
        assert!(result.tokens.is_empty());
        assert_eq!(
            result.errors[0].kind,
            ScanErrorKind::NumberOutOfRange(source.to_string())
        );
    }

    #[test]
    fn identifier_and_keyword_scanned() {
        assert_eq!(kinds("evens"), vec![TokenKind::Identifier("evens")]);
        assert_eq!(kinds("_x1"), vec![TokenKind::Identifier("_x1")]);
        assert_eq!(kinds("remove"), vec![TokenKind::Keyword(Keyword::Remove)]);
        assert_eq!(kinds("集合"), vec![TokenKind::Identifier("集合")]);
    }

    #[test]
    fn scans_statement() {
        assert_eq!(
            kinds("let s = {1 9, 144}; // done"),
            vec![
                TokenKind::Keyword(Keyword::Let),
                TokenKind::Identifier("s"),
                TokenKind::Equal,
                TokenKind::LBrace,
                TokenKind::Number(1),
                TokenKind::Number(9),
                TokenKind::Comma,
                TokenKind::Number(144),
                TokenKind::RBrace,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn scan_tokens_collects_tokens_and_errors() {
        let mut scanner = Scanner::new("( @ 123 / x");
        let result = scanner.scan_tokens();
        assert_eq!(result.tokens[0].kind, TokenKind::LParen);
        assert_eq!(result.tokens[1].kind, TokenKind::Number(123));
        assert_eq!(result.tokens[2].kind, TokenKind::Identifier("x"));
        assert_eq!(result.errors.len(), 2);
        assert_eq!(
            result.errors[0].kind,
            ScanErrorKind::UnexpectedCharacter('@')
        );
        assert_eq!(result.errors[0].span, Span { start: 2, end: 3 });
        assert_eq!(
            result.errors[1].kind,
            ScanErrorKind::UnexpectedCharacter('/')
        );
        assert_eq!(result.eof_span, Span::empty_at(11));
    }

    #[test]
    fn iterator_over_scanner_yields_tokens() {
        let mut scanner = Scanner::new("|-");
        assert_eq!(scanner.next().unwrap().unwrap().kind, TokenKind::Pipe);
        assert_eq!(scanner.next().unwrap().unwrap().kind, TokenKind::Minus);
        assert!(scanner.next().is_none());
    }
}
