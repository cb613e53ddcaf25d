use super::error::{LexicalError, LexicalErrorType};
use super::token::{str_to_keyword, Token, TokenKind};
use crate::utils::prelude::SrcSpan;

pub type LexResult = std::result::Result<Token, LexicalError>;

/// Converts a whole source string into tokens, ending with a single `Eof`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexicalError> {
	let tokens = Lexer::new(source.char_indices().map(|(i, c)| (i as u32, c)))
		.collect::<Result<Vec<Token>, LexicalError>>()?;

	tracing::debug!(tokens = tokens.len(), "tokenized source");

	Ok(tokens)
}

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	next_position: u32,
	ch: Option<char>,
	next_ch: Option<char>,
	line: u32,
	column: u32,
	input: T,

	finished: bool,
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
        let mut lexer = Self {
            position: 0,
            next_position: 0,
            ch: None,
			next_ch: None,
			line: 1,
			column: 1,
            input,

			finished: false,
        };

        lexer.next_char();
        lexer.next_char();

        lexer
    }

    pub fn next_token(&mut self) -> LexResult {
		self.skip_trivia();

		let start = self.here();

		let ch = match self.ch {
			Some(ch) => ch,
			None => return Ok(Token::new(TokenKind::Eof, "", start)),
		};

		let token = match ch {
			'(' => self.eat_one_char(TokenKind::LParen),
			')' => self.eat_one_char(TokenKind::RParen),
			'{' => self.eat_one_char(TokenKind::LBrace),
			'}' => self.eat_one_char(TokenKind::RBrace),
			';' => self.eat_one_char(TokenKind::Semicolon),
			',' => self.eat_one_char(TokenKind::Comma),
			'+' => self.eat_one_char(TokenKind::Plus),
			'-' => self.eat_one_char(TokenKind::Minus),
			'*' => self.eat_one_char(TokenKind::Star),
			'/' => self.eat_one_char(TokenKind::Slash),
			'!' => self.eat_one_or_two(TokenKind::Bang, TokenKind::NotEqual),
			'=' => self.eat_one_or_two(TokenKind::Assign, TokenKind::Equal),
			'<' => self.eat_one_or_two(TokenKind::LessThan, TokenKind::LessThanOrEqual),
			'>' => self.eat_one_or_two(TokenKind::GreaterThan, TokenKind::GreaterThanOrEqual),
			'"' => return self.lex_string(),
			'0'..='9' => self.lex_number(),
			'a'..='z' | 'A'..='Z' | '_' => self.lex_ident(),
			c => {
				return Err(LexicalError {
					error: LexicalErrorType::UnrecognizedToken { tok: c },
					location: SrcSpan { end: start.start + c.len_utf8() as u32, ..start },
				});
			}
		};

		Ok(token)
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

		match ch {
			Some('\n') => {
				self.line += 1;
				self.column = 1;
			},
			Some(_) => self.column += 1,
			None => {}
		}

		self.ch = self.next_ch;
		self.next_ch = next;

		ch
	}

	/// Zero-width span at the current character.
	fn here(&self) -> SrcSpan {
		SrcSpan::from(self.position, self.position, self.line, self.column)
	}

	fn span_from(&self, start: SrcSpan) -> SrcSpan {
		SrcSpan { end: self.position, ..start }
	}

	fn skip_trivia(&mut self) {
		loop {
			match (self.ch, self.next_ch) {
				(Some(' ' | '\t' | '\r' | '\n' | '\x0C'), _) => {
					self.next_char();
				},
				(Some('/'), Some('/')) => {
					while !matches!(self.ch, Some('\n') | None) {
						self.next_char();
					}
				},
				_ => break
			}
		}
	}

	fn eat_one_char(&mut self, kind: TokenKind) -> Token {
		let start = self.here();
		let mut lexeme = String::new();

		if let Some(ch) = self.next_char() {
			lexeme.push(ch);
		}

		Token::new(kind, lexeme, self.span_from(start))
	}

	// `==`, `!=`, `<=`, `>=` win over their one-character prefix.
	fn eat_one_or_two(&mut self, single: TokenKind, double: TokenKind) -> Token {
		if self.next_ch != Some('=') {
			return self.eat_one_char(single);
		}

		let start = self.here();
		let mut lexeme = String::with_capacity(2);

		for _ in 0..2 {
			if let Some(ch) = self.next_char() {
				lexeme.push(ch);
			}
		}

		Token::new(double, lexeme, self.span_from(start))
	}

	fn lex_ident(&mut self) -> Token {
        let start = self.here();
		let mut ident = String::new();

		while let Some(ch) = self.ch {
			if !(ch.is_ascii_alphanumeric() || ch == '_') {
				break;
			}

			ident.push(ch);
			self.next_char();
		}

		let kind = str_to_keyword(&ident).unwrap_or(TokenKind::Ident);

		Token::new(kind, ident, self.span_from(start))
	}

	fn lex_number(&mut self) -> Token {
		let start = self.here();
		let mut value = String::new();

		self.eat_digits(&mut value);

		// A period only belongs to the literal when a digit follows it.
		if self.ch == Some('.') && matches!(self.next_ch, Some(c) if c.is_ascii_digit()) {
			value.push('.');
			self.next_char();
			self.eat_digits(&mut value);
		}

		// `value` is `digits[.digits]`, which always parses.
		let number = value.parse::<f64>().unwrap_or_default();

		Token::new(TokenKind::Number(number), value, self.span_from(start))
	}

	fn eat_digits(&mut self, value: &mut String) {
		while let Some(ch) = self.ch {
			if !ch.is_ascii_digit() {
				break;
			}

			value.push(ch);
			self.next_char();
		}
	}

	fn lex_string(&mut self) -> LexResult {
		let start = self.here();
		let mut lexeme = String::from("\"");
		let mut value = String::new();

		self.next_char(); // skip opening quote

		loop {
			match self.ch {
				Some('"') => {
					self.next_char();
					lexeme.push('"');
					break;
				},
				Some(ch) => {
					value.push(ch);
					lexeme.push(ch);
					self.next_char();
				},
				None => return Err(LexicalError {
					error: LexicalErrorType::UnterminatedString,
					location: SrcSpan { end: start.start + 1, ..start },
				})
			}
		}

		Ok(Token::new(TokenKind::String(value), lexeme, self.span_from(start)))
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = LexResult;

	fn next(&mut self) -> Option<Self::Item> {
		if self.finished {
			return None;
		}

		let token = self.next_token();

		if !matches!(token, Ok(ref tok) if !tok.is_eof()) {
			self.finished = true;
		}

		Some(token)
	}
}

impl<T: Iterator<Item = (u32, char)>> std::iter::FusedIterator for Lexer<T> {}
