use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Open,
    Go,
    Type,
    Click,
    Enter,
    Wait,
    Screenshot,
    Close,

    // Literals
    Identifier,
    String,
    Number,
    Url,
}

impl TokenKind {
    /// Resolves a lexeme against the reserved words, ignoring case.
    pub fn keyword(word: &str) -> Option<Self> {
        const KEYWORDS: [(&str, TokenKind); 8] = [
            ("open", TokenKind::Open),
            ("go", TokenKind::Go),
            ("type", TokenKind::Type),
            ("click", TokenKind::Click),
            ("enter", TokenKind::Enter),
            ("wait", TokenKind::Wait),
            ("screenshot", TokenKind::Screenshot),
            ("close", TokenKind::Close),
        ];
        KEYWORDS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(word))
            .map(|(_, kind)| *kind)
    }

    pub fn is_keyword(&self) -> bool {
        !matches!(
            self,
            TokenKind::Identifier | TokenKind::String | TokenKind::Number | TokenKind::Url
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Open => "OPEN",
            TokenKind::Go => "GO",
            TokenKind::Type => "TYPE",
            TokenKind::Click => "CLICK",
            TokenKind::Enter => "ENTER",
            TokenKind::Wait => "WAIT",
            TokenKind::Screenshot => "SCREENSHOT",
            TokenKind::Close => "CLOSE",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::Url => "URL",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A lexeme borrowed from the source, positioned at its first character.
///
/// `text` keeps the original case; for string literals it is the content
/// between the quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub line: usize,
    pub column: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, line: usize, column: usize) -> Self {
        Self {
            kind,
            text,
            line,
            column,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TOKEN({}, '{}', {}, {})",
            self.kind, self.text, self.line, self.column
        )
    }
}
