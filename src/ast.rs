//! Syntax tree shared by the semantic pass and the code generator.
//!
//! The parser builds these nodes once; both later stages only read them.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    Id,
    Name,
    Xpath,
    Css,
    Tag,
}

impl SelectorKind {
    pub fn from_name(name: &str) -> Option<Self> {
        const KINDS: [(&str, SelectorKind); 5] = [
            ("id", SelectorKind::Id),
            ("name", SelectorKind::Name),
            ("xpath", SelectorKind::Xpath),
            ("css", SelectorKind::Css),
            ("tag", SelectorKind::Tag),
        ];
        KINDS
            .iter()
            .find(|(kind, _)| kind.eq_ignore_ascii_case(name))
            .map(|(_, kind)| *kind)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SelectorKind::Id => "id",
            SelectorKind::Name => "name",
            SelectorKind::Xpath => "xpath",
            SelectorKind::Css => "css",
            SelectorKind::Tag => "tag",
        }
    }
}

/// Locator strategy plus the value it searches for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub kind: SelectorKind,
    pub value: String,
}

impl Selector {
    pub fn new(kind: SelectorKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Open {
        browser: String,
    },
    Go {
        url: String,
    },
    Type {
        text: String,
        selector: Option<Selector>,
    },
    Click {
        selector: Option<Selector>,
    },
    Enter {
        selector: Option<Selector>,
    },
    /// Zero and negative values parse; the semantic pass rejects them.
    Wait {
        seconds: i64,
    },
    Screenshot {
        filename: String,
    },
    Close,
}

impl Statement {
    pub fn keyword(&self) -> &'static str {
        match self {
            Statement::Open { .. } => "open",
            Statement::Go { .. } => "go",
            Statement::Type { .. } => "type",
            Statement::Click { .. } => "click",
            Statement::Enter { .. } => "enter",
            Statement::Wait { .. } => "wait",
            Statement::Screenshot { .. } => "screenshot",
            Statement::Close => "close",
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Open { browser } => write!(f, "Open(browser={browser:?})"),
            Statement::Go { url } => write!(f, "Go(url={url:?})"),
            Statement::Type { text, selector } => {
                write!(f, "Type(text={text:?}")?;
                write_selector(f, ", ", selector.as_ref())?;
                f.write_str(")")
            }
            Statement::Click { selector } => {
                f.write_str("Click(")?;
                write_selector(f, "", selector.as_ref())?;
                f.write_str(")")
            }
            Statement::Enter { selector } => {
                f.write_str("Enter(")?;
                write_selector(f, "", selector.as_ref())?;
                f.write_str(")")
            }
            Statement::Wait { seconds } => write!(f, "Wait(seconds={seconds})"),
            Statement::Screenshot { filename } => write!(f, "Screenshot(filename={filename:?})"),
            Statement::Close => f.write_str("Close()"),
        }
    }
}

fn write_selector(
    f: &mut fmt::Formatter<'_>,
    separator: &str,
    selector: Option<&Selector>,
) -> fmt::Result {
    match selector {
        Some(selector) => write!(
            f,
            "{separator}{}={:?}",
            selector.kind.name(),
            selector.value
        ),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

/// Renders the program as a tree, one statement per branch.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.statements.is_empty() {
            return f.write_str("Program([])");
        }
        writeln!(f, "Program(")?;
        let last = self.statements.len() - 1;
        for (index, statement) in self.statements.iter().enumerate() {
            let branch = if index < last { "├─" } else { "└─" };
            writeln!(f, "  {branch} {statement}")?;
        }
        f.write_str(")")
    }
}
