use crate::{lexer::prelude::{lexer_for, LexResult, LexicalError, Spanned, Token}, utils::prelude::SrcSpan};
use super::error::{ParseError, ParseErrorType};
use super::ast::Program;

/// Most top-level statements accepted on one line.
pub const MAX_STATEMENTS_PER_LINE: usize = 100;

/// Deepest nesting of parentheses, unary signs, `if` and `while` accepted
/// before parsing gives up instead of exhausting the stack.
pub const MAX_NESTING_DEPTH: usize = 200;

pub trait Parse<T: Iterator<Item = LexResult>>
    where Self: Sized,
{
    fn parse(parser: &mut Parser<T>) -> Result<Self, ParseError>;
}

/// Holds the current token and one token of lookahead. A lexical error
/// leaves an empty slot in the buffer and is reported once parsing stops.
pub struct Parser<T: Iterator<Item = LexResult>> {
    pub current_token: Option<Spanned>,
    pub next_token: Option<Spanned>,
    pub lex_errors: Vec<LexicalError>,

    depth: usize,
    tokens: T,
}

impl<T: Iterator<Item = LexResult>> Parser<T> {
    pub fn new(input: T) -> Self {
        let mut parser = Self {
            current_token: None,
            next_token: None,
            lex_errors: vec![],

            depth: 0,
            tokens: input,
        };

        parser.step();
        parser.step();

        parser
    }

    pub fn step(&mut self) {
        let _ = self.next_token();
    }

    pub fn next_token(&mut self) -> Option<Spanned> {
        let t = self.current_token.take();

        let next = match self.tokens.next() {
            Some(Ok(tok)) => Some(tok),
            Some(Err(err)) => {
                self.lex_errors.push(err);

                None
            },
            None => None
        };

        self.current_token = self.next_token.take();
        self.next_token = next;

        t
    }

    pub fn current_is(&self, token: &Token) -> bool {
        matches!(&self.current_token, Some((_, tok, _)) if tok == token)
    }

    pub fn next_is(&self, token: &Token) -> bool {
        matches!(&self.next_token, Some((_, tok, _)) if tok == token)
    }

    pub fn current_span(&self) -> SrcSpan {
        match &self.current_token {
            Some((start, _, end)) => SrcSpan { start: *start, end: *end },
            None => SrcSpan::default()
        }
    }

    /// Parses the whole line. When both a lexical and a syntax error were
    /// found, the one further left in the source is reported.
    pub fn parse(&mut self) -> Result<Program, ParseError> {
        let program = Program::parse(self)
            .and_then(|program| {
                self.expect_end()?;
                Ok(program)
            });

        let Some(lex_error) = self.lex_errors.first() else {
            return program;
        };

        let lex_error = ParseError {
            error: ParseErrorType::LexError { error: *lex_error },
            span: lex_error.location
        };

        match program {
            // running into the gap a lexical error left means that error came first
            Err(error) if !matches!(error.error, ParseErrorType::UnexpectedEof)
                && error.span.start < lex_error.span.start => Err(error),
            _ => Err(lex_error)
        }
    }

    /// Runs `parse` one nesting level deeper, failing once
    /// [`MAX_NESTING_DEPTH`] levels are open.
    pub fn nested<R>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<R, ParseError>
    ) -> Result<R, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return parse_error(
                ParseErrorType::TooDeeplyNested { limit: MAX_NESTING_DEPTH },
                self.current_span()
            );
        }

        self.depth += 1;
        let res = parse(self);
        self.depth -= 1;

        res
    }

    pub fn expect_one(&mut self, token: Token) -> Result<(u32, u32), ParseError> {
        match self.current_token.take() {
            Some((start, tok, end)) if tok == token => {
                self.step();
                Ok((start, end))
            },
            t => {
                self.current_token = t;

                Err(self.unexpected(vec![format!("`{}`", token.as_literal())]))
            }
        }
    }

    pub fn expect_ident(&mut self) -> Result<(u32, String, u32), ParseError> {
        match self.current_token.take() {
            Some((start, Token::Ident(value), end)) => {
                self.step();
                Ok((start, value, end))
            },
            t => {
                self.current_token = t;

                Err(self.unexpected(vec!["an Identifier".to_string()]))
            }
        }
    }

    pub fn expect_end(&mut self) -> Result<(), ParseError> {
        match &self.current_token {
            Some((_, Token::Eof, _)) => Ok(()),
            _ => Err(self.unexpected(vec!["`;`".to_string(), "end of input".to_string()]))
        }
    }

    /// Error for the current token, which matched none of `expected`.
    pub fn unexpected(&self, expected: Vec<String>) -> ParseError {
        match &self.current_token {
            Some((start, token, end)) => ParseError {
                error: ParseErrorType::UnexpectedToken {
                    token: token.clone(),
                    expected
                },
                span: SrcSpan { start: *start, end: *end }
            },
            None => ParseError {
                error: ParseErrorType::UnexpectedEof,
                span: SrcSpan::default()
            }
        }
    }
}

pub fn parse_line(src: &str) -> Result<Program, ParseError> {
    let mut parser = Parser::new(lexer_for(src));

    parser.parse()
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}

/// Binding strength of infix operators. Comparisons deliberately share the
/// additive level, so `1 + 2 > 2 + 1` parses as `((1 + 2) > 2) + 1`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Precedence {
    Lowest,
    Sum,
    Product
}

impl From<&Token> for Precedence {
    fn from(value: &Token) -> Self {
        match value {
            Token::Plus | Token::Minus |
            Token::GreaterThan | Token::LessThan | Token::Equal => Self::Sum,
            Token::Mult | Token::Div => Self::Product,
            _ => Self::Lowest,
        }
    }
}

impl<T: Iterator<Item = LexResult>> Parser<T> {
    pub fn current_precedence(&self) -> Precedence {
        match &self.current_token {
            Some((_, token, _)) => Precedence::from(token),
            None => Precedence::Lowest
        }
    }
}
