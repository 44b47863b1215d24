//! Emits a Python/Selenium script from a program that passed semantic
//! analysis. Generation cannot fail; an unvalidated tree still produces text,
//! just not a script that makes sense.

use self::selenium::{
    Browser, CHROME_STEALTH_OPTIONS, DEFAULT_LOCATOR, EDGE_SETUP, FIREFOX_SETUP, IMPORTS,
    SAFARI_SETUP, STRIP_WEBDRIVER_FLAG, by_constant, escape_python_string,
};
use crate::ast::{Program, Selector, SelectorKind, Statement};

mod options;
pub mod selenium;

pub use options::{ConfigError, DEFAULT_USER_AGENT, GeneratorOptions};

/// Line buffer owned by a single `generate` call.
struct CodeBuffer {
    lines: Vec<String>,
}

impl CodeBuffer {
    fn new() -> Self {
        Self { lines: Vec::new() }
    }

    fn push_line(&mut self, indent: usize, line: &str) {
        self.lines.push(format!("{}{line}", "    ".repeat(indent)));
    }

    fn push_all(&mut self, lines: &[&str]) {
        for line in lines {
            self.push_line(0, line);
        }
    }

    fn finish(self) -> String {
        let mut output = self.lines.join("\n");
        output.push('\n');
        output
    }
}

#[derive(Debug, Clone, Default)]
pub struct Generator {
    options: GeneratorOptions,
}

impl Generator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn generate(&self, program: &Program) -> String {
        let mut out = CodeBuffer::new();
        out.push_all(&IMPORTS);
        out.push_line(0, "");
        for statement in &program.statements {
            self.emit_statement(statement, &mut out);
        }
        out.finish()
    }

    fn emit_statement(&self, statement: &Statement, out: &mut CodeBuffer) {
        match statement {
            Statement::Open { browser } => self.emit_open(browser, out),
            Statement::Go { url } => {
                out.push_line(0, &format!("driver.get(\"{}\")", escape_python_string(url)));
            }
            Statement::Type { text, selector } => {
                out.push_line(
                    0,
                    &format!(
                        "{}.send_keys(\"{}\")",
                        find_element(selector.as_ref()),
                        escape_python_string(text)
                    ),
                );
            }
            Statement::Click { selector } => self.emit_click(selector.as_ref(), out),
            Statement::Enter { selector } => {
                out.push_line(
                    0,
                    &format!("{}.send_keys(Keys.ENTER)", find_element(selector.as_ref())),
                );
            }
            Statement::Wait { seconds } => out.push_line(0, &format!("time.sleep({seconds})")),
            Statement::Screenshot { filename } => {
                out.push_line(
                    0,
                    &format!(
                        "driver.save_screenshot(\"{}\")",
                        escape_python_string(filename)
                    ),
                );
            }
            Statement::Close => out.push_line(0, "driver.quit()"),
        }
    }

    fn emit_open(&self, browser: &str, out: &mut CodeBuffer) {
        match Browser::from_name(browser) {
            Some(Browser::Chrome) => self.emit_chrome(out),
            Some(Browser::Firefox) => out.push_all(&FIREFOX_SETUP),
            Some(Browser::Edge) => out.push_all(&EDGE_SETUP),
            Some(Browser::Safari) => out.push_line(0, SAFARI_SETUP),
            None => {
                out.push_line(
                    0,
                    &format!("# Unknown browser '{browser}', falling back to Chrome"),
                );
                self.emit_chrome(out);
            }
        }
        out.push_line(0, &format!("time.sleep({})", self.options.settle_seconds));
    }

    fn emit_chrome(&self, out: &mut CodeBuffer) {
        out.push_line(0, "# Configure Chrome options to avoid bot detection");
        out.push_line(0, "chrome_options = ChromeOptions()");
        out.push_all(&CHROME_STEALTH_OPTIONS);
        out.push_line(
            0,
            &format!(
                "chrome_options.add_argument(\"--window-size={}\")",
                escape_python_string(&self.options.window_size)
            ),
        );
        out.push_line(
            0,
            &format!(
                "chrome_options.add_argument(\"user-agent={}\")",
                escape_python_string(&self.options.user_agent)
            ),
        );
        out.push_line(0, "driver = webdriver.Chrome(options=chrome_options)");
        out.push_line(0, "# Remove the navigator.webdriver marker");
        out.push_line(0, STRIP_WEBDRIVER_FLAG);
    }

    fn emit_click(&self, selector: Option<&Selector>, out: &mut CodeBuffer) {
        if let Some(selector) = selector
            && selector.kind == SelectorKind::Css
        {
            let alternatives = css_alternatives(&selector.value);
            if alternatives.len() > 1 {
                emit_click_fallback(&alternatives, out);
                return;
            }
        }

        let (kind, value) = locator(selector);
        out.push_line(0, "try:");
        out.push_line(1, &format!("{}.click()", find_element(selector)));
        out.push_line(0, "except Exception as exc:");
        out.push_line(
            1,
            &format!(
                "print(\"Warning: could not click element {} '{}':\", exc)",
                kind.name(),
                escape_python_string(value)
            ),
        );
    }
}

/// One attempt block per alternative, all guarded by the same flag, followed
/// by a single warning when none of them matched.
fn emit_click_fallback(alternatives: &[&str], out: &mut CodeBuffer) {
    out.push_line(0, "clicked = False");
    for alternative in alternatives {
        out.push_line(0, "if not clicked:");
        out.push_line(1, "try:");
        out.push_line(
            2,
            &format!(
                "driver.find_element({}, \"{}\").click()",
                by_constant(SelectorKind::Css),
                escape_python_string(alternative)
            ),
        );
        out.push_line(2, "clicked = True");
        out.push_line(1, "except Exception:");
        out.push_line(2, "pass");
    }
    out.push_line(0, "if not clicked:");
    out.push_line(
        1,
        &format!(
            "print(\"Warning: no element matched any of the selectors: {}\")",
            escape_python_string(&alternatives.join(", "))
        ),
    );
}

fn css_alternatives(value: &str) -> Vec<&str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|alternative| !alternative.is_empty())
        .collect()
}

fn locator(selector: Option<&Selector>) -> (SelectorKind, &str) {
    match selector {
        Some(selector) => (selector.kind, selector.value.as_str()),
        None => DEFAULT_LOCATOR,
    }
}

fn find_element(selector: Option<&Selector>) -> String {
    let (kind, value) = locator(selector);
    format!(
        "driver.find_element({}, \"{}\")",
        by_constant(kind),
        escape_python_string(value)
    )
}

pub fn generate(program: &Program) -> String {
    Generator::default().generate(program)
}
