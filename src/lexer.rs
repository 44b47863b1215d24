use std::{iter::Peekable, str::CharIndices};

use crate::token::{Token, TokenKind};

mod error;

pub use error::{LexError, LexResult};

const URL_SCHEMES: [&str; 2] = ["http://", "https://"];

pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Scans the next token, or returns `None` once the input is exhausted.
    pub fn next_token(&mut self) -> LexResult<Option<Token<'a>>> {
        loop {
            let Some(&(start, ch)) = self.chars.peek() else {
                return Ok(None);
            };
            let line = self.line;
            let column = self.column;

            if ch.is_whitespace() {
                self.advance_char();
                continue;
            }
            if ch == '#' {
                self.skip_comment();
                continue;
            }
            // URLs start like identifiers, so they get the first chance.
            if let Some(token) = self.read_url(start, line, column) {
                return Ok(Some(token));
            }

            return match ch {
                '"' => self.read_string(start, line, column).map(Some),
                c if c.is_ascii_digit() => Ok(Some(self.read_integer(start, line, column))),
                '-' if self.digit_follows(start) => {
                    Ok(Some(self.read_integer(start, line, column)))
                }
                c if c.is_ascii_alphabetic() || c == '_' => {
                    Ok(Some(self.read_identifier(start, line, column)))
                }
                _ => Err(LexError::UnexpectedCharacter {
                    character: ch,
                    line,
                    column,
                }),
            };
        }
    }

    fn skip_comment(&mut self) {
        while let Some(&(_, c)) = self.chars.peek() {
            if c == '\n' {
                break;
            }
            self.advance_char();
        }
    }

    fn read_url(&mut self, start: usize, line: usize, column: usize) -> Option<Token<'a>> {
        let rest = &self.input[start..];
        let scheme_len = URL_SCHEMES
            .iter()
            .find(|scheme| rest.starts_with(**scheme))?
            .len();
        let body = &rest[scheme_len..];
        let body_len = body.find(char::is_whitespace).unwrap_or(body.len());
        if body_len == 0 {
            return None;
        }

        let end = start + scheme_len + body_len;
        while self.current_index() < end {
            self.advance_char();
        }
        Some(Token::new(
            TokenKind::Url,
            &self.input[start..end],
            line,
            column,
        ))
    }

    fn read_string(&mut self, start: usize, line: usize, column: usize) -> LexResult<Token<'a>> {
        self.advance_char(); // Consume opening quote
        let content_start = start + 1;
        while let Some(&(idx, c)) = self.chars.peek() {
            if c == '"' {
                self.advance_char(); // Consume closing quote
                return Ok(Token::new(
                    TokenKind::String,
                    &self.input[content_start..idx],
                    line,
                    column,
                ));
            }
            if c == '\n' {
                break;
            }
            self.advance_char();
        }
        Err(LexError::UnterminatedString { line, column })
    }

    fn read_integer(&mut self, start: usize, line: usize, column: usize) -> Token<'a> {
        self.advance_char(); // Consume first digit or sign
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_ascii_digit() {
                self.advance_char();
            } else {
                break;
            }
        }

        let end = self.current_index();
        Token::new(TokenKind::Number, &self.input[start..end], line, column)
    }

    fn read_identifier(&mut self, start: usize, line: usize, column: usize) -> Token<'a> {
        self.advance_char(); // Consume first char
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
                self.advance_char();
            } else {
                break;
            }
        }

        let end = self.current_index();
        let ident = &self.input[start..end];
        let kind = TokenKind::keyword(ident).unwrap_or(TokenKind::Identifier);
        Token::new(kind, ident, line, column)
    }

    fn digit_follows(&self, start: usize) -> bool {
        self.input[start + 1..].starts_with(|c: char| c.is_ascii_digit())
    }

    fn advance_char(&mut self) -> Option<(usize, char)> {
        let next = self.chars.next();
        if let Some((_, c)) = next {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        next
    }

    fn current_index(&mut self) -> usize {
        self.chars
            .peek()
            .map(|(idx, _)| *idx)
            .unwrap_or(self.input.len())
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = LexResult<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

pub fn tokenize(input: &str) -> LexResult<Vec<Token<'_>>> {
    Lexer::new(input).collect()
}
