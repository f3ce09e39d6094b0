use super::error::{LexicalError, LexicalErrorType};
use super::token::Token;
use crate::utils::prelude::SrcSpan;

pub type Spanned = (u32, Token, u32);
pub type LexResult = std::result::Result<Spanned, LexicalError>;

/// Longest accepted identifier that is not a keyword.
pub const MAX_IDENTIFIER_LENGTH: usize = 4;

pub fn str_to_keyword(word: &str) -> Option<Token> {
	Some(match word {
		"if" => Token::If,
		"then" => Token::Then,
		"else" => Token::Else,
		"while" => Token::While,
		"do" => Token::Do,
		_ => return None
	})
}

/// Pulls tokens out of a `(byte offset, char)` stream on demand. Once the
/// input is exhausted every further call yields [`Token::Eof`].
#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	next_position: u32,
	ch: Option<char>,
	next_ch: Option<char>,
	input: T,
}

/// Lexer over a line of source, positions are byte offsets into `src`.
pub fn lexer_for(src: &str) -> Lexer<impl Iterator<Item = (u32, char)> + '_> {
	Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)))
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
		let mut lexer = Self {
			position: 0,
			next_position: 0,
			ch: None,
			next_ch: None,
			input,
		};

		lexer.next_char();
		lexer.next_char();

		lexer
	}

	pub fn next_token(&mut self) -> LexResult {
		self.skip_whitespace();

		let span = match self.ch {
			Some(ch) => match ch {
				'+' => self.eat_one_char(Token::Plus),
				'-' => self.eat_one_char(Token::Minus),
				'*' => self.eat_one_char(Token::Mult),
				'/' => self.eat_one_char(Token::Div),
				'>' => self.eat_one_char(Token::GreaterThan),
				'<' => self.eat_one_char(Token::LessThan),
				'(' => self.eat_one_char(Token::LParen),
				')' => self.eat_one_char(Token::RParen),
				'{' => self.eat_one_char(Token::LBrace),
				'}' => self.eat_one_char(Token::RBrace),
				';' => self.eat_one_char(Token::Semicolon),
				'=' => match self.next_ch {
					Some('=') => self.eat_two_chars(Token::Equal),
					_ => self.eat_one_char(Token::Assign),
				},
				c if c.is_ascii_digit() => {
					return self.lex_number();
				},
				c if c.is_alphabetic() => {
					return self.lex_ident();
				},
				c => {
					let start = self.position;
					let _ = self.next_char();

					return Err(LexicalError {
						error: LexicalErrorType::UnrecognizedToken { tok: c },
						location: SrcSpan::from(start, self.position),
					});
				}
			},
			None => {
				self.eat_one_char(Token::Eof)
			}
		};

		Ok(span)
	}

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		let next = match self.input.next() {
			Some((pos, ch)) => {
				self.position = self.next_position;
				self.next_position = pos;

				Some(ch)
			},
			None => {
				self.position = self.next_position;
				self.next_position += self.next_ch.map_or(0, |c| c.len_utf8() as u32);

				None
			}
		};

		self.ch = self.next_ch;
		self.next_ch = next;

		ch
	}

	fn skip_whitespace(&mut self) {
		while self.ch.is_some_and(char::is_whitespace) {
			let _ = self.next_char();
		}
	}

	fn eat_one_char(&mut self, token: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();
		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	fn eat_two_chars(&mut self, token: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();
		self.next_char();
		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	fn lex_ident(&mut self) -> LexResult {
		let start_pos = self.position;
		let mut ident = String::new();

		while let Some(ch) = self.ch.filter(|ch| ch.is_alphabetic()) {
			ident.push(ch);
			let _ = self.next_char();
		}

		let end_pos = self.position;

		if let Some(tok) = str_to_keyword(&ident) {
			return Ok((start_pos, tok, end_pos));
		}

		let length = ident.chars().count();

		if length > MAX_IDENTIFIER_LENGTH {
			return Err(LexicalError {
				error: LexicalErrorType::IdentifierTooLong { length },
				location: SrcSpan::from(start_pos, end_pos)
			});
		}

		Ok((start_pos, Token::Ident(ident), end_pos))
	}

	fn lex_number(&mut self) -> LexResult {
		let start_pos = self.position;
		let mut value = String::new();

		while let Some(ch) = self.ch.filter(char::is_ascii_digit) {
			value.push(ch);
			let _ = self.next_char();
		}

		let end_pos = self.position;

		match value.parse::<i64>() {
			Ok(value) => Ok((start_pos, Token::Int(value), end_pos)),
			Err(_) => Err(LexicalError {
				error: LexicalErrorType::IntegerTooLarge,
				location: SrcSpan::from(start_pos, end_pos)
			})
		}
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = LexResult;

	fn next(&mut self) -> Option<Self::Item> {
		let token = self.next_token();

		Some(token)
	}
}
