use crate::ast::{Program, Selector, SelectorKind, Statement};
use crate::token::{Token, TokenKind};

mod error;

pub use error::{ParseError, ParseResult};

/// Recursive-descent parser over an already tokenized script.
///
/// Statements have no terminator: each rule consumes its keyword plus a fixed
/// argument list, and the next token starts the next statement.
pub struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token<'a>]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn parse_program(mut self) -> ParseResult<Program> {
        let mut statements = Vec::new();
        while let Some(token) = self.peek() {
            statements.push(self.parse_statement(token)?);
        }
        Ok(Program { statements })
    }

    fn parse_statement(&mut self, token: Token<'a>) -> ParseResult<Statement> {
        match token.kind {
            TokenKind::Open => self.parse_open(),
            TokenKind::Go => self.parse_go(),
            TokenKind::Type => self.parse_type(),
            TokenKind::Click => self.parse_click(),
            TokenKind::Enter => self.parse_enter(),
            TokenKind::Wait => self.parse_wait(),
            TokenKind::Screenshot => self.parse_screenshot(),
            TokenKind::Close => {
                self.advance();
                Ok(Statement::Close)
            }
            kind => Err(ParseError::at(&token, format!("Unexpected token: {kind}"))),
        }
    }

    fn parse_open(&mut self) -> ParseResult<Statement> {
        self.advance();
        let browser = self.expect(
            TokenKind::Identifier,
            "Expected browser identifier after 'open'",
        )?;
        Ok(Statement::Open {
            browser: browser.text.to_string(),
        })
    }

    fn parse_go(&mut self) -> ParseResult<Statement> {
        self.advance();
        let url = self.expect(TokenKind::Url, "Expected URL after 'go'")?;
        Ok(Statement::Go {
            url: url.text.to_string(),
        })
    }

    fn parse_type(&mut self) -> ParseResult<Statement> {
        self.advance();
        let text = self.expect(TokenKind::String, "Expected string literal after 'type'")?;
        let selector = self.parse_selector_clause()?;
        Ok(Statement::Type {
            text: text.text.to_string(),
            selector,
        })
    }

    fn parse_click(&mut self) -> ParseResult<Statement> {
        self.advance();
        let selector = self.parse_selector_clause()?;
        Ok(Statement::Click { selector })
    }

    fn parse_enter(&mut self) -> ParseResult<Statement> {
        self.advance();
        let selector = self.parse_selector_clause()?;
        Ok(Statement::Enter { selector })
    }

    fn parse_wait(&mut self) -> ParseResult<Statement> {
        self.advance();
        let number = self.expect(TokenKind::Number, "Expected number after 'wait'")?;
        let seconds = number
            .text
            .parse::<i64>()
            .map_err(|_| ParseError::at(&number, format!("Invalid number: {}", number.text)))?;
        Ok(Statement::Wait { seconds })
    }

    fn parse_screenshot(&mut self) -> ParseResult<Statement> {
        self.advance();
        let filename = self.expect(
            TokenKind::Identifier,
            "Expected filename after 'screenshot'",
        )?;
        Ok(Statement::Screenshot {
            filename: filename.text.to_string(),
        })
    }

    /// `<kind> "<value>"`, where kind is one of the selector kind names.
    /// Any other token leaves the clause absent.
    fn parse_selector_clause(&mut self) -> ParseResult<Option<Selector>> {
        let Some(token) = self.peek() else {
            return Ok(None);
        };
        if token.kind != TokenKind::Identifier {
            return Ok(None);
        }
        let Some(kind) = SelectorKind::from_name(token.text) else {
            return Ok(None);
        };

        self.advance();
        let value = self.expect(
            TokenKind::String,
            &format!("Expected selector string after '{}'", token.text),
        )?;
        Ok(Some(Selector::new(kind, value.text)))
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> ParseResult<Token<'a>> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.advance();
                Ok(token)
            }
            Some(token) => Err(ParseError::at(
                &token,
                format!("{message}, but found {} ('{}')", token.kind, token.text),
            )),
            None => Err(self.end_of_file(message)),
        }
    }

    fn end_of_file(&self, message: &str) -> ParseError {
        match self.tokens.last() {
            Some(last) => ParseError::at(last, format!("{message} (reached end of file)")),
            None => ParseError::new(format!("{message} (no tokens available)"), 1, 1),
        }
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }
}

pub fn parse(tokens: &[Token<'_>]) -> ParseResult<Program> {
    Parser::new(tokens).parse_program()
}
