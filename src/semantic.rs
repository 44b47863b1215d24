//! Ordering checks over a parsed program.
//!
//! A script models one browser session: element interaction needs a loaded
//! page, navigation needs an open browser, and opening a browser again drops
//! whatever page was loaded before.

use crate::ast::{Program, Statement};

mod error;

pub use error::SemanticError;

/// Session flags accumulated while walking the statements left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionState {
    pub browser_opened: bool,
    pub page_loaded: bool,
}

impl SessionState {
    /// Applies one statement, returning the state the next statement sees.
    fn step(self, statement: &Statement, index: usize) -> Result<Self, SemanticError> {
        let fail = |message: String| Err(SemanticError::new(message, index));
        match statement {
            Statement::Open { .. } => Ok(Self {
                browser_opened: true,
                page_loaded: false,
            }),
            Statement::Go { url } => {
                if !self.browser_opened {
                    return fail(format!(
                        "Cannot navigate to URL '{url}' before opening a browser"
                    ));
                }
                Ok(Self {
                    page_loaded: true,
                    ..self
                })
            }
            Statement::Type { text, .. } => {
                if !self.page_loaded {
                    return fail(format!("Cannot type text '{text}' before loading a page"));
                }
                Ok(self)
            }
            Statement::Click { .. } => {
                if !self.page_loaded {
                    return fail("Cannot click element before loading a page".to_string());
                }
                Ok(self)
            }
            Statement::Enter { .. } => {
                if !self.page_loaded {
                    return fail("Cannot press Enter before loading a page".to_string());
                }
                Ok(self)
            }
            Statement::Wait { seconds } => {
                if *seconds <= 0 {
                    return fail(format!(
                        "Wait time must be greater than 0, but got {seconds}"
                    ));
                }
                Ok(self)
            }
            Statement::Screenshot { filename } => {
                if !self.browser_opened {
                    return fail(format!(
                        "Cannot take screenshot '{filename}' before opening a browser"
                    ));
                }
                Ok(self)
            }
            Statement::Close => {
                if !self.browser_opened {
                    return fail("Cannot close browser before opening one".to_string());
                }
                Ok(self)
            }
        }
    }
}

/// Runs the ordering checks and returns the flags after the last statement.
pub fn check(program: &Program) -> Result<SessionState, SemanticError> {
    program
        .statements
        .iter()
        .enumerate()
        .try_fold(SessionState::default(), |state, (index, statement)| {
            state.step(statement, index + 1)
        })
}

pub fn analyze(program: &Program) -> Result<(), SemanticError> {
    check(program).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer, parser};
    use indoc::indoc;

    fn analyze_source(input: &str) -> Result<SessionState, SemanticError> {
        let tokens = lexer::tokenize(input).expect("tokenize should succeed");
        let program = parser::parse(&tokens).expect("parse should succeed");
        check(&program)
    }

    #[test]
    fn valid_program_passes() {
        let input = indoc! {r#"
            open chrome
            go https://google.com
            type "compiler project"
            enter
            wait 2
            screenshot test.png
            close
        "#};
        let state = analyze_source(input).expect("analysis should pass");
        assert_eq!(
            state,
            SessionState {
                browser_opened: true,
                page_loaded: true,
            }
        );
    }

    #[test]
    fn empty_program_passes() {
        assert_eq!(analyze(&Program::default()), Ok(()));
    }

    #[test]
    fn go_before_open_fails_at_first_statement() {
        let err = analyze_source("go https://google.com").expect_err("expected failure");
        assert_eq!(err.statement_index, 1);
        assert_eq!(
            err.message,
            "Cannot navigate to URL 'https://google.com' before opening a browser"
        );
    }

    #[test]
    fn wait_must_be_positive() {
        for (input, got) in [("open chrome\nwait 0", 0), ("open chrome\nwait -5", -5)] {
            let err = analyze_source(input).expect_err("expected failure");
            assert_eq!(err.statement_index, 2);
            assert_eq!(
                err.message,
                format!("Wait time must be greater than 0, but got {got}")
            );
        }
        assert!(analyze_source("open chrome\nwait 1").is_ok());
    }

    #[test]
    fn interaction_needs_a_loaded_page() {
        let err = analyze_source("open chrome\ntype \"hello\"").expect_err("expected failure");
        assert_eq!(err.statement_index, 2);
        assert!(err.message.contains("Cannot type text 'hello' before loading a page"));

        let err = analyze_source("open chrome\nenter").expect_err("expected failure");
        assert_eq!(err.message, "Cannot press Enter before loading a page");

        let err = analyze_source("open chrome\nclick id \"go\"").expect_err("expected failure");
        assert_eq!(err.message, "Cannot click element before loading a page");
    }

    #[test]
    fn reopening_the_browser_drops_the_page() {
        let input = indoc! {r#"
            open chrome
            go https://example.com
            open firefox
            type "x"
        "#};
        let err = analyze_source(input).expect_err("expected failure");
        assert_eq!(err.statement_index, 4);
        assert!(err.message.contains("before loading a page"));
    }

    #[test]
    fn reopened_browser_can_load_a_new_page() {
        let input = indoc! {r#"
            open chrome
            go https://example.com
            open firefox
            go https://example.org
            type "x"
        "#};
        let state = analyze_source(input).expect("analysis should pass");
        assert_eq!(
            state,
            SessionState {
                browser_opened: true,
                page_loaded: true,
            }
        );
    }

    #[test]
    fn screenshot_and_close_need_a_browser() {
        let err = analyze_source("screenshot test.png").expect_err("expected failure");
        assert_eq!(
            err.to_string(),
            "Semantic error: Cannot take screenshot 'test.png' before opening a browser at statement 1"
        );

        let err = analyze_source("wait 1\nclose").expect_err("expected failure");
        assert_eq!(err.statement_index, 2);
        assert_eq!(err.message, "Cannot close browser before opening one");
    }

    #[test]
    fn stops_at_first_violation() {
        let err = analyze_source("wait 0\ngo https://a.io").expect_err("expected failure");
        assert_eq!(err.statement_index, 1);
    }

    #[test]
    fn browser_without_page_is_reported_in_state() {
        let state = analyze_source("open edge\nwait 3\nscreenshot shot.png").expect("passes");
        assert!(state.browser_opened);
        assert!(!state.page_loaded);
    }
}
