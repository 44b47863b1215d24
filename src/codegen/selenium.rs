use crate::ast::SelectorKind;

pub const IMPORTS: [&str; 7] = [
    "from selenium import webdriver",
    "from selenium.webdriver.chrome.options import Options as ChromeOptions",
    "from selenium.webdriver.firefox.options import Options as FirefoxOptions",
    "from selenium.webdriver.edge.options import Options as EdgeOptions",
    "from selenium.webdriver.common.by import By",
    "from selenium.webdriver.common.keys import Keys",
    "import time",
];

/// Chrome flags that hide the automation banner and the blink automation
/// feature; appended before the configurable window size and user agent.
pub const CHROME_STEALTH_OPTIONS: [&str; 6] = [
    "chrome_options.add_argument('--disable-blink-features=AutomationControlled')",
    "chrome_options.add_experimental_option('excludeSwitches', ['enable-automation'])",
    "chrome_options.add_experimental_option('useAutomationExtension', False)",
    "chrome_options.add_argument('--disable-dev-shm-usage')",
    "chrome_options.add_argument('--no-sandbox')",
    "chrome_options.add_argument('--disable-gpu')",
];

pub const FIREFOX_SETUP: [&str; 4] = [
    "firefox_options = FirefoxOptions()",
    "firefox_options.set_preference('dom.webdriver.enabled', False)",
    "firefox_options.set_preference('useAutomationExtension', False)",
    "driver = webdriver.Firefox(options=firefox_options)",
];

pub const EDGE_SETUP: [&str; 4] = [
    "edge_options = EdgeOptions()",
    "edge_options.add_argument('--disable-blink-features=AutomationControlled')",
    "edge_options.add_experimental_option('excludeSwitches', ['enable-automation'])",
    "driver = webdriver.Edge(options=edge_options)",
];

pub const SAFARI_SETUP: &str = "driver = webdriver.Safari()";

pub const STRIP_WEBDRIVER_FLAG: &str = "driver.execute_script(\"Object.defineProperty(navigator, 'webdriver', {get: () => undefined})\")";

/// Locator used by `type`, `click` and `enter` when the script names none.
pub const DEFAULT_LOCATOR: (SelectorKind, &str) = (SelectorKind::Name, "q");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Browser {
    Chrome,
    Firefox,
    Edge,
    Safari,
}

impl Browser {
    pub fn from_name(name: &str) -> Option<Self> {
        const BROWSERS: [(&str, Browser); 4] = [
            ("chrome", Browser::Chrome),
            ("firefox", Browser::Firefox),
            ("edge", Browser::Edge),
            ("safari", Browser::Safari),
        ];
        BROWSERS
            .iter()
            .find(|(browser, _)| browser.eq_ignore_ascii_case(name))
            .map(|(_, browser)| *browser)
    }
}

pub fn by_constant(kind: SelectorKind) -> &'static str {
    match kind {
        SelectorKind::Id => "By.ID",
        SelectorKind::Name => "By.NAME",
        SelectorKind::Xpath => "By.XPATH",
        SelectorKind::Css => "By.CSS_SELECTOR",
        SelectorKind::Tag => "By.TAG_NAME",
    }
}

/// Makes a value safe to place between double quotes in Python source.
///
/// Quotes get a backslash and backslashes are doubled. Control characters
/// become escape sequences so the literal stays on one line: a bare `\r` can
/// come from a string literal, anything else from a config file.
pub fn escape_python_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() => escaped.push_str(&format!("\\x{:02x}", u32::from(c))),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browsers_ignore_case() {
        assert_eq!(Browser::from_name("Chrome"), Some(Browser::Chrome));
        assert_eq!(Browser::from_name("FIREFOX"), Some(Browser::Firefox));
        assert_eq!(Browser::from_name("opera"), None);
    }

    #[test]
    fn escapes_quotes_backslashes_and_line_breaks() {
        assert_eq!(escape_python_string("plain text"), "plain text");
        assert_eq!(escape_python_string("a\rb"), r"a\rb");
        assert_eq!(escape_python_string("a\nb\tc"), r"a\nb\tc");
        assert_eq!(escape_python_string("nul\0"), r"nul\x00");
        assert_eq!(escape_python_string(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_python_string(r"C:\tmp"), r"C:\\tmp");
        assert_eq!(escape_python_string("it's"), "it's");
    }
}
